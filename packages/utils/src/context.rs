use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::runtime::Runtime;
use tracing::instrument;

/// Owns the runtime the servers are driven on, plus a broadcast kill switch
#[derive(Clone)]
pub struct AppContext {
    pub rt: Arc<Runtime>,
    killed: Arc<AtomicBool>,
    kill_sender: tokio::sync::broadcast::Sender<()>,
    // keeps the channel open, so `kill` never fails for lack of receivers
    _kill_receiver: Arc<tokio::sync::broadcast::Receiver<()>>,
}

impl AppContext {
    pub fn new() -> std::io::Result<Self> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        Ok(Self::new_with_runtime(Arc::new(rt)))
    }

    pub fn new_with_runtime(rt: Arc<Runtime>) -> Self {
        let (kill_sender, kill_receiver) = tokio::sync::broadcast::channel(1);

        Self {
            rt,
            kill_sender,
            _kill_receiver: Arc::new(kill_receiver),
            killed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Signals all running tasks that they should stop
    /// async code awaits the receiver to shut down gracefully
    #[instrument(skip(self), fields(subsys = "AppContext"))]
    pub fn get_kill_receiver(&self) -> tokio::sync::broadcast::Receiver<()> {
        self.kill_sender.subscribe()
    }

    /// This is typically only called from main or tests
    #[instrument(skip(self), fields(subsys = "AppContext"))]
    pub fn kill(&self) {
        if !self.killed.swap(true, Ordering::SeqCst) {
            // the held receiver guarantees there is at least one subscriber
            let _ = self.kill_sender.send(());
        }
    }

    pub fn killed(&self) -> bool {
        self.killed.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod test {
    use super::AppContext;

    #[test]
    fn kill_switch_drop_fails() {
        let sender = {
            let (sender, _) = tokio::sync::broadcast::channel::<&'static str>(1);
            sender
        };

        sender.send("hello").unwrap_err();
    }

    #[test]
    fn kill_reaches_receivers() {
        let ctx = AppContext::new().unwrap();
        let mut receiver = ctx.get_kill_receiver();

        assert!(!ctx.killed());
        ctx.kill();
        assert!(ctx.killed());

        ctx.rt.block_on(async move {
            receiver.recv().await.unwrap();
        });
    }

    #[test]
    fn kill_twice_is_harmless() {
        let ctx = AppContext::new().unwrap();

        ctx.kill();
        ctx.kill();

        assert!(ctx.killed());
    }
}
