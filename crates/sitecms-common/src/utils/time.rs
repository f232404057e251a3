use chrono::Utc;

pub fn current_timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Query value appended to document fetches so caches never serve a stale copy.
pub fn cache_buster() -> String {
    current_timestamp_millis().to_string()
}

pub fn rfc3339_now() -> String {
    Utc::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_functions() {
        let now = current_timestamp_millis();
        assert!(now > 0);

        let buster = cache_buster();
        assert!(buster.parse::<i64>().unwrap() >= now);

        assert!(chrono::DateTime::parse_from_rfc3339(&rfc3339_now()).is_ok());
    }
}
