use regex::Regex;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Mf2Duration ISO-8601时长值
///
/// 周在解析时折算为天。序列化输出规范化文本，如P1DT2H30M。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mf2Duration {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Mf2Duration {
    /// 解析ISO-8601时长文本
    ///
    /// 至少要有一个分量，否则返回None。
    pub fn parse(input: &str) -> Option<Self> {
        let pattern = Regex::new(
            r"^P(?:(\d+)Y)?(?:(\d+)M)?(?:(\d+)W)?(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$",
        )
        .ok()?;
        let caps = pattern.captures(input.trim())?;
        if caps.iter().skip(1).all(|c| c.is_none()) {
            return None;
        }
        let field = |index: usize| -> Option<u32> {
            match caps.get(index) {
                Some(m) => m.as_str().parse().ok(),
                None => Some(0),
            }
        };
        let weeks = field(3)?;
        Some(Self {
            years: field(1)?,
            months: field(2)?,
            days: field(4)?.checked_add(weeks.checked_mul(7)?)?,
            hours: field(5)?,
            minutes: field(6)?,
            seconds: field(7)?,
        })
    }

    pub fn is_zero(&self) -> bool {
        self.years == 0
            && self.months == 0
            && self.days == 0
            && self.hours == 0
            && self.minutes == 0
            && self.seconds == 0
    }

    /// 规范化的ISO-8601文本
    pub fn to_iso8601(&self) -> String {
        if self.is_zero() {
            return "PT0S".to_string();
        }
        let mut out = String::from("P");
        if self.years > 0 {
            out.push_str(&format!("{}Y", self.years));
        }
        if self.months > 0 {
            out.push_str(&format!("{}M", self.months));
        }
        if self.days > 0 {
            out.push_str(&format!("{}D", self.days));
        }
        if self.hours > 0 || self.minutes > 0 || self.seconds > 0 {
            out.push('T');
            if self.hours > 0 {
                out.push_str(&format!("{}H", self.hours));
            }
            if self.minutes > 0 {
                out.push_str(&format!("{}M", self.minutes));
            }
            if self.seconds > 0 {
                out.push_str(&format!("{}S", self.seconds));
            }
        }
        out
    }
}

impl fmt::Display for Mf2Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl Serialize for Mf2Duration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso8601())
    }
}

impl<'de> Deserialize<'de> for Mf2Duration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Mf2Duration::parse(&text)
            .ok_or_else(|| DeError::custom(format!("invalid ISO-8601 duration: {}", text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_and_time_parts() {
        let duration = Mf2Duration::parse("P1DT2H30M").unwrap();
        assert_eq!(duration.days, 1);
        assert_eq!(duration.hours, 2);
        assert_eq!(duration.minutes, 30);
        assert_eq!(duration.seconds, 0);
    }

    #[test]
    fn test_parse_weeks_fold_into_days() {
        let duration = Mf2Duration::parse("P2W").unwrap();
        assert_eq!(duration.days, 14);
        assert_eq!(duration.to_iso8601(), "P14D");
    }

    #[test]
    fn test_parse_time_only() {
        let duration = Mf2Duration::parse("PT45S").unwrap();
        assert_eq!(duration.seconds, 45);
        assert_eq!(duration.to_iso8601(), "PT45S");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Mf2Duration::parse(""), None);
        assert_eq!(Mf2Duration::parse("P"), None);
        assert_eq!(Mf2Duration::parse("PT"), None);
        assert_eq!(Mf2Duration::parse("1H30M"), None);
        assert_eq!(Mf2Duration::parse("soon"), None);
    }

    #[test]
    fn test_canonical_round_trip() {
        for text in ["P1Y2M3DT4H5M6S", "P3D", "PT1H", "PT0S"] {
            let duration = Mf2Duration::parse(text).unwrap();
            assert_eq!(duration.to_iso8601(), text);
            assert_eq!(Mf2Duration::parse(&duration.to_iso8601()), Some(duration));
        }
    }

    #[test]
    fn test_serde_as_string() {
        let duration = Mf2Duration::parse("PT90M").unwrap();
        let json = serde_json::to_string(&duration).unwrap();
        assert_eq!(json, r#""PT90M""#);
        let back: Mf2Duration = serde_json::from_str(&json).unwrap();
        assert_eq!(back, duration);
    }
}
