use super::*;
use crate::api::Api;
use crate::config::Retry;
use futures::StreamExt;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use tokio::sync::mpsc::UnboundedSender;

/// Background producer for one session's event stream.
///
/// Owns the transport read loop so the session only ever sees decoded
/// [`Event`]s. Any open, read, or decode failure abandons the current
/// stream and reopens it under the retry policy; the server resends a
/// full snapshot on every connection, so a reconnect is invisible to the
/// session beyond the events it decodes. The halt flag is checked before
/// every (re)connect so no connection is opened for a session that
/// already terminated.
pub struct Reader {
    api: Arc<dyn Api>,
    game_id: String,
    tx: UnboundedSender<Event>,
    halt: Arc<AtomicBool>,
    retry: Retry,
    attempts: u32,
}

impl Reader {
    pub fn new(
        api: Arc<dyn Api>,
        game_id: String,
        tx: UnboundedSender<Event>,
        halt: Arc<AtomicBool>,
        retry: Retry,
    ) -> Self {
        Self {
            api,
            game_id,
            tx,
            halt,
            retry,
            attempts: 0,
        }
    }

    /// Reads until the stream is exhausted or the retry budget is spent,
    /// then reports end-of-stream exactly once.
    pub async fn run(mut self) {
        loop {
            if self.halt.load(Ordering::Relaxed) {
                return;
            }
            match self.watch().await {
                Ok(()) => break,
                Err(e) => {
                    log::warn!("[game {}] stream dropped: {:#}", self.game_id, e);
                    if !self.recoil().await {
                        break;
                    }
                }
            }
        }
        let _ = self.tx.send(Event::EndOfStream);
    }

    /// One connect-and-drain pass: empty lines become pings, everything
    /// else is decoded. Returns Ok only when the server closes the stream
    /// or the consumer is gone.
    async fn watch(&mut self) -> anyhow::Result<()> {
        let mut feed = self.api.game_stream(&self.game_id).await?;
        self.attempts = 0;
        while let Some(chunk) = feed.next().await {
            let chunk = chunk?;
            let line = chunk.trim_ascii();
            let event = match line.is_empty() {
                true => Some(Event::Ping),
                false => Event::decode(line)?,
            };
            if let Some(event) = event {
                if self.tx.send(event).is_err() {
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    /// Backoff between reconnects; false once the attempt budget is spent.
    async fn recoil(&mut self) -> bool {
        self.attempts += 1;
        if self.retry.attempts.is_some_and(|cap| self.attempts >= cap) {
            log::error!(
                "[game {}] giving up after {} failed stream attempts",
                self.game_id,
                self.attempts
            );
            return false;
        }
        tokio::time::sleep(self.retry.delay(self.attempts)).await;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Feed;
    use bytes::Bytes;
    use futures::stream;
    use std::sync::Mutex;
    use tokio::sync::mpsc::unbounded_channel;

    /// Transport whose stream contents change per connection: each open
    /// pops the next script, and an exhausted script list fails the open.
    struct Flaky {
        scripts: Mutex<Vec<Vec<&'static str>>>,
    }

    impl Flaky {
        fn new(scripts: Vec<Vec<&'static str>>) -> Arc<Self> {
            Arc::new(Self {
                scripts: Mutex::new(scripts),
            })
        }
    }

    #[async_trait::async_trait]
    impl Api for Flaky {
        async fn game_stream(&self, _: &str) -> anyhow::Result<Feed> {
            let mut scripts = self.scripts.lock().unwrap();
            match scripts.is_empty() {
                true => anyhow::bail!("connection refused"),
                false => {
                    let lines = scripts.remove(0);
                    Ok(stream::iter(lines.into_iter().map(|l| Ok(Bytes::from(l)))).boxed())
                }
            }
        }
        async fn send_move(&self, _: &str, _: &str, _: bool) -> anyhow::Result<()> {
            Ok(())
        }
        async fn resign_game(&self, _: &str) -> anyhow::Result<()> {
            Ok(())
        }
        async fn abort_game(&self, _: &str) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn quick() -> Retry {
        Retry {
            attempts: Some(4),
            min_delay_ms: 1,
            max_delay_ms: 2,
        }
    }

    #[tokio::test]
    async fn decode_failure_reopens_the_stream() {
        let api = Flaky::new(vec![
            vec![r#"{"type":"opponentGone"}"#, "{torn off mid-line"],
            vec!["", r#"{"type":"opponentGone"}"#],
        ]);
        let (tx, mut rx) = unbounded_channel();
        let halt = Arc::new(AtomicBool::new(false));
        Reader::new(api, "abc".into(), tx, halt, quick()).run().await;
        assert_eq!(rx.recv().await, Some(Event::OpponentGone));
        assert_eq!(rx.recv().await, Some(Event::Ping));
        assert_eq!(rx.recv().await, Some(Event::OpponentGone));
        assert_eq!(rx.recv().await, Some(Event::EndOfStream));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn spent_attempt_budget_still_ends_the_stream() {
        let api = Flaky::new(vec![]);
        let (tx, mut rx) = unbounded_channel();
        let halt = Arc::new(AtomicBool::new(false));
        Reader::new(api, "abc".into(), tx, halt, quick()).run().await;
        assert_eq!(rx.recv().await, Some(Event::EndOfStream));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn halted_reader_never_reconnects() {
        let api = Flaky::new(vec![vec![""]]);
        let (tx, mut rx) = unbounded_channel();
        let halt = Arc::new(AtomicBool::new(true));
        Reader::new(api, "abc".into(), tx, halt, quick()).run().await;
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn keep_alive_lines_become_pings() {
        let api = Flaky::new(vec![vec!["", "  \n", r#"{"type":"opponentGone"}"#]]);
        let (tx, mut rx) = unbounded_channel();
        let halt = Arc::new(AtomicBool::new(false));
        Reader::new(api, "abc".into(), tx, halt, quick()).run().await;
        assert_eq!(rx.recv().await, Some(Event::Ping));
        assert_eq!(rx.recv().await, Some(Event::Ping));
        assert_eq!(rx.recv().await, Some(Event::OpponentGone));
        assert_eq!(rx.recv().await, Some(Event::EndOfStream));
    }
}
