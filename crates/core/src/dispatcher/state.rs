use mentor_chat_actor::{Actor, Message};

use super::{ConcurrencyPolicy, DispatcherState, worker};

impl DispatcherState {
    fn submit_turn(&mut self, text: String, handle: &Actor<Self>) {
        if text.trim().is_empty() {
            trace!("ignoring blank submission");
            return;
        }
        if self.policy == ConcurrencyPolicy::Serialized
            && !self.running_workers.is_empty()
        {
            debug!(queued = self.pending_turns.len() + 1, "turn queued");
            self.pending_turns.push_back(text);
            return;
        }
        self.start_worker(text, handle);
    }

    fn start_worker(&mut self, text: String, handle: &Actor<Self>) {
        let worker_id = self.next_worker_id;
        self.next_worker_id += 1;

        let turn = worker::run_turn(
            self.model_client.clone(),
            self.renderer.clone(),
            self.settings.clone(),
            text,
        );
        let renderer = self.renderer.clone();
        let handle = handle.clone();
        let task = tokio::spawn(async move {
            // The turn runs on its own task so a panic inside it still
            // reports back and frees the queue.
            if let Err(err) = tokio::spawn(turn).await {
                error!(worker_id, "worker crashed: {err}");
                worker::render_crash(&renderer).ok();
            }
            handle.send(WorkerFinished(worker_id)).ok();
        });
        self.running_workers.insert(worker_id, task);
        debug!(worker_id, running = self.running_workers.len(), "worker started");
    }

    fn finish_worker(&mut self, worker_id: u64, handle: &Actor<Self>) {
        if self.running_workers.remove(&worker_id).is_none() {
            warn!(worker_id, "finished worker was not tracked");
        }
        debug!(worker_id, "worker finished");

        if self.running_workers.is_empty() {
            if let Some(text) = self.pending_turns.pop_front() {
                self.start_worker(text, handle);
                return;
            }
            if let Some(on_idle) = &self.on_idle {
                on_idle();
            }
        }
    }
}

#[derive(Debug)]
pub struct SubmitTurn(pub String);

impl Message<DispatcherState> for SubmitTurn {
    #[inline]
    fn handle(self, state: &mut DispatcherState, handle: &Actor<DispatcherState>) {
        state.submit_turn(self.0, handle);
    }
}

#[derive(Debug)]
struct WorkerFinished(u64);

impl Message<DispatcherState> for WorkerFinished {
    #[inline]
    fn handle(self, state: &mut DispatcherState, handle: &Actor<DispatcherState>) {
        state.finish_worker(self.0, handle);
    }
}
