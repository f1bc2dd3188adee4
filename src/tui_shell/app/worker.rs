use crate::model::LogEntry;

use super::*;

/// Results handed back to the UI thread by background tasks.
#[derive(Debug)]
pub(super) enum WorkerMsg {
    Store { generation: u64, event: StoreEvent },
    Log(LogEntry),
    SendFinished,
    Draft(Result<String, String>),
}

/// Activity-log sink for tasks running off the UI thread.
pub(super) struct ChannelLog(pub(super) mpsc::Sender<WorkerMsg>);

impl LogSink for ChannelLog {
    fn log(&mut self, severity: Severity, message: String) {
        let _ = self.0.send(WorkerMsg::Log(LogEntry::new(severity, message)));
    }
}

impl App {
    /// Applies everything background tasks have reported since the last tick.
    pub(super) fn drain_worker(&mut self) {
        while let Ok(msg) = self.worker_rx.try_recv() {
            self.apply_worker_msg(msg);
        }
    }

    pub(super) fn apply_worker_msg(&mut self, msg: WorkerMsg) {
        match msg {
            WorkerMsg::Store { generation, event } => {
                if generation != self.session.generation() || !self.session.is_connected() {
                    tracing::debug!(generation, "dropping event from closed subscription");
                    return;
                }
                match event {
                    StoreEvent::Value(value) => {
                        if let Some(v) = self.control_mut() {
                            v.set_live_value(value, OffsetDateTime::now_utc());
                        }
                    }
                    StoreEvent::ReadError(err) => {
                        self.log.error(format!("Read failed: {}", err));
                    }
                }
            }
            WorkerMsg::Log(entry) => self.log.push(entry),
            WorkerMsg::SendFinished => {
                if let Some(v) = self.control_mut() {
                    v.sending = false;
                }
            }
            WorkerMsg::Draft(res) => {
                match res {
                    Ok(draft) => {
                        self.log.success("AI generated a command.");
                        if let Some(v) = self.control_mut() {
                            v.set_draft(draft, Origin::Ai);
                        }
                    }
                    Err(err) => self.log.error(format!("AI Generation failed: {}", err)),
                }
                if let Some(v) = self.control_mut() {
                    v.generating = false;
                }
            }
        }
    }
}
