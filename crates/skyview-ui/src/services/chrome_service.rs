//! Deferred page chrome work (the contact acknowledgement timer).

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeServiceMessage {
    /// The contact acknowledgement has been shown long enough
    AcknowledgementElapsed,
}

/// Post `AcknowledgementElapsed` after `delay`. Returns whether a timer was started.
///
/// Timers are not cancelable: every submission schedules its own.
pub fn schedule_acknowledgement_hide<M>(tx: &UnboundedSender<M>, delay: Duration) -> bool
where
    M: From<ChromeServiceMessage> + Send + 'static,
{
    let runtime = match tokio::runtime::Handle::try_current() {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!("No tokio runtime, acknowledgement stays visible: {}", e);
            return false;
        }
    };
    let tx = tx.clone();

    runtime.spawn(async move {
        tokio::time::sleep(delay).await;
        let _ = tx.send(M::from(ChromeServiceMessage::AcknowledgementElapsed));
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn without_runtime_nothing_is_scheduled() {
        let (tx, _rx) = mpsc::unbounded_channel::<ChromeServiceMessage>();
        assert!(!schedule_acknowledgement_hide(&tx, Duration::from_secs(5)));
    }

    #[tokio::test(start_paused = true)]
    async fn fires_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel::<ChromeServiceMessage>();
        schedule_acknowledgement_hide(&tx, Duration::from_secs(5));

        tokio::time::sleep(Duration::from_millis(4_900)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(
            rx.try_recv(),
            Ok(ChromeServiceMessage::AcknowledgementElapsed)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn each_schedule_fires_once() {
        let (tx, mut rx) = mpsc::unbounded_channel::<ChromeServiceMessage>();
        schedule_acknowledgement_hide(&tx, Duration::from_secs(5));
        tokio::time::sleep(Duration::from_secs(2)).await;
        schedule_acknowledgement_hide(&tx, Duration::from_secs(5));

        assert_eq!(rx.recv().await, Some(ChromeServiceMessage::AcknowledgementElapsed));
        assert_eq!(rx.recv().await, Some(ChromeServiceMessage::AcknowledgementElapsed));
        assert!(rx.try_recv().is_err());
    }
}
