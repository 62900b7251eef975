/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate an appointment order code: `ORD-<millis>-<4 random digits>`.
///
/// The millisecond timestamp makes collisions effectively impossible within
/// a tenant; the random suffix covers same-millisecond bookings.
pub fn appointment_order_code() -> String {
    use rand::Rng;
    let suffix: u32 = rand::thread_rng().gen_range(1000..10000);
    format!("ORD-{}-{}", now_millis(), suffix)
}

/// Generate a product order code: `ORD-<yyyymmdd>-<4 random digits>`.
///
/// Collisions are not checked — the date prefix plus 4 random digits matches
/// the historical receipt format consumed by downstream tooling.
pub fn order_code() -> String {
    use rand::Rng;
    let date_part = chrono::Utc::now().format("%Y%m%d");
    let suffix: u32 = rand::thread_rng().gen_range(1000..10000);
    format!("ORD-{}-{}", date_part, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_code_format() {
        let code = order_code();
        let parts: Vec<&str> = code.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "ORD");
        assert_eq!(parts[1].len(), 8);
        assert_eq!(parts[2].len(), 4);
        assert!(parts[2].parse::<u32>().is_ok());
    }

    #[test]
    fn test_appointment_order_code_unique_suffix_range() {
        let code = appointment_order_code();
        let suffix: u32 = code.rsplit('-').next().unwrap().parse().unwrap();
        assert!((1000..10000).contains(&suffix));
    }
}
