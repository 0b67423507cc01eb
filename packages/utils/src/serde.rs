use std::fmt;

use serde::{de, Deserializer};

/// Accepts either a TOML/JSON sequence or a comma-separated string (as env vars give us)
pub fn deserialize_vec_string<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrVec;

    impl<'de> de::Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a comma-separated string or a sequence of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Vec<String>, E>
        where
            E: de::Error,
        {
            Ok(value
                .split(',')
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
                .collect())
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Vec<String>, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(elem) = seq.next_element()? {
                vec.push(elem);
            }
            Ok(vec)
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

#[cfg(test)]
mod test {
    use serde::Deserialize;

    use super::deserialize_vec_string;

    #[derive(Deserialize)]
    struct Origins {
        #[serde(deserialize_with = "deserialize_vec_string")]
        origins: Vec<String>,
    }

    #[test]
    fn comma_separated_string() {
        let parsed: Origins =
            serde_json::from_str(r#"{"origins": "http://a.com, *.b.com,,"}"#).unwrap();

        assert_eq!(parsed.origins, ["http://a.com", "*.b.com"]);
    }

    #[test]
    fn sequence() {
        let parsed: Origins =
            serde_json::from_str(r#"{"origins": ["http://a.com", "*.b.com"]}"#).unwrap();

        assert_eq!(parsed.origins, ["http://a.com", "*.b.com"]);
    }
}
