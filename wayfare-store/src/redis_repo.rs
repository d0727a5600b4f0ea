use redis::{AsyncCommands, RedisResult};

/// What one counted request means for its fixed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowCheck {
    pub allowed: bool,
    /// The counter has no expiry yet, so this request opens the window.
    pub opens_window: bool,
}

impl WindowCheck {
    /// `count` is the value after `INCR`; `ttl` is the key's TTL in seconds,
    /// negative when none is set.
    pub fn evaluate(count: i64, ttl: i64, limit: i64) -> Self {
        Self {
            allowed: count <= limit,
            opens_window: ttl < 0,
        }
    }
}

#[derive(Clone)]
pub struct RedisClient {
    client: redis::Client,
}

impl RedisClient {
    pub fn new(connection_string: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(connection_string)?;
        Ok(Self { client })
    }

    /// Fixed-window counter. Returns false once `limit` requests have been
    /// seen for `key` in the current window. The expiry is set once per
    /// window; requests inside it never push it back.
    pub async fn check_rate_limit(&self, key: &str, limit: i64, window_seconds: i64) -> RedisResult<bool> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let (count, ttl): (i64, i64) = redis::pipe()
            .atomic()
            .incr(key, 1)
            .ttl(key)
            .query_async(&mut conn)
            .await?;

        let check = WindowCheck::evaluate(count, ttl, limit);
        if check.opens_window {
            conn.expire::<_, ()>(key, window_seconds).await?;
        }

        Ok(check.allowed)
    }
}
