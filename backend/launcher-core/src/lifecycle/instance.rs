use crate::error::CoreError;
use crate::lock::InstanceLock;
use crate::server::RunningServer;

use log::info;

#[derive(Debug)]
pub enum StartOutcome {
    /// This process started the server and owns the lock.
    Running(RunningInstance),
    /// Another process already serves this installation.
    AlreadyRunning { port: u16 },
}

/// A started server together with the lock that makes it the only one.
#[derive(Debug)]
pub struct RunningInstance {
    server: RunningServer,
    lock: InstanceLock,
}

impl RunningInstance {
    pub(crate) fn new(server: RunningServer, lock: InstanceLock) -> Self {
        Self { server, lock }
    }

    pub fn port(&self) -> u16 {
        self.server.port()
    }

    pub fn stop(&self) {
        self.server.stop();
    }

    /// Block until the server stops, then release the lock.
    pub async fn join(self) -> Result<(), CoreError> {
        let RunningInstance { server, lock } = self;
        let port = server.port();

        let result = server.join().await;
        lock.release();
        info!("Instance on port {port} finished");

        result.map_err(CoreError::from)
    }
}
