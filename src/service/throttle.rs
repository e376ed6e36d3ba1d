use std::time::Duration;

/// Fixed pause inserted before every outbound lookup.
///
/// Cooperative only: the delay never adapts to upstream responses.
#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    delay: Duration,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Throttle { delay }
    }

    pub async fn wait(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}
