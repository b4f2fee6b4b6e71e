use chrono::{DateTime, Utc};

pub fn time_millis() -> i64 {
    let time: DateTime<chrono::Utc> = Utc::now();
    time.timestamp_millis()
}

pub fn time_secs() -> i64 {
    let time: DateTime<chrono::Utc> = Utc::now();
    time.timestamp()
}
