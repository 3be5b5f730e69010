use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;

use crate::common::{ChatCommand, LifecycleEvent, Session, SessionEvent};
use crate::error::StartupError;
use crate::network::ChatApi;

use super::composer::Composer;
use super::constants::{
    COMMAND_BUFFER, HEARTBEAT_INTERVAL, MESSAGE_POLL_INTERVAL, ONLINE_POLL_INTERVAL,
};
use super::feed::FeedSynchronizer;
use super::session::SessionManager;
use super::state::{ChatSnapshot, Phase};
use super::store::ChatStore;
use super::tasks::TaskSet;

/// Drives startup ordering and owns every background task of the client.
pub struct LifecycleController {
    store: ChatStore,
    sessions: SessionManager,
    feed: FeedSynchronizer,
    composer: Composer,
    command_tx: mpsc::Sender<ChatCommand>,
    command_rx: Mutex<Option<mpsc::Receiver<ChatCommand>>>,
    tasks: Mutex<Option<TaskSet>>,
}

impl LifecycleController {
    pub fn new(api: Arc<dyn ChatApi>) -> Self {
        let store = ChatStore::new();
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        Self {
            sessions: SessionManager::new(Arc::clone(&api)),
            feed: FeedSynchronizer::new(Arc::clone(&api), store.clone()),
            composer: Composer::new(api, store.clone()),
            store,
            command_tx,
            command_rx: Mutex::new(Some(command_rx)),
            tasks: Mutex::new(None),
        }
    }

    /// Replaces the session id generator used during startup.
    pub fn with_session_ids(mut self, id_source: fn() -> String) -> Self {
        self.sessions = self.sessions.clone().with_id_source(id_source);
        self
    }

    pub fn store(&self) -> ChatStore {
        self.store.clone()
    }

    pub fn handle(&self) -> ChatHandle {
        ChatHandle {
            store: self.store.clone(),
            composer: self.composer.clone(),
            commands: self.command_tx.clone(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.store.read(|snapshot| snapshot.phase.clone())
    }

    /// Registers a session, loads the initial feed and online count, then
    /// starts the polling, heartbeat and command loops. Runs at most once.
    pub async fn start(&self) -> Result<(), StartupError> {
        let started = self
            .store
            .dispatch_if(|snapshot| snapshot.phase == Phase::Idle, LifecycleEvent::InitStarted);
        if !started {
            return Err(match self.phase() {
                Phase::Disposed => StartupError::Disposed,
                _ => StartupError::AlreadyStarted,
            });
        }
        log::info!("Initializing chat client");

        let result = match self.initialize().await {
            Ok(session) => self.enter_ready(session),
            Err(err) => Err(err),
        };

        if let Err(err) = &result {
            log::error!("Chat startup failed: {err}");
            self.store
                .dispatch(LifecycleEvent::InitFailed(err.user_message()));
        }
        result
    }

    async fn initialize(&self) -> Result<Session, StartupError> {
        let session = self.sessions.create_session().await?;
        log::info!("Registered as {}", session.username);
        self.store.dispatch(SessionEvent::Registered(session.clone()));

        let count = self
            .feed
            .fetch_messages()
            .await
            .map_err(StartupError::InitialMessages)?;
        log::debug!("Initial feed has {count} messages");

        self.feed
            .fetch_online_count()
            .await
            .map_err(StartupError::InitialOnlineCount)?;

        Ok(session)
    }

    fn enter_ready(&self, session: Session) -> Result<(), StartupError> {
        let mut slot = self.lock_tasks();
        if self.store.is_disposed() {
            return Err(StartupError::Disposed);
        }
        let Some(mut commands) = self
            .command_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        else {
            return Err(StartupError::AlreadyStarted);
        };

        let mut tasks = TaskSet::new();

        let feed = self.feed.clone();
        tasks.spawn_repeating("message-poll", MESSAGE_POLL_INTERVAL, move || {
            let feed = feed.clone();
            async move { feed.poll_messages().await }
        });

        let feed = self.feed.clone();
        tasks.spawn_repeating("online-poll", ONLINE_POLL_INTERVAL, move || {
            let feed = feed.clone();
            async move { feed.poll_online_count().await }
        });

        let sessions = self.sessions.clone();
        let heartbeat_session = session.clone();
        tasks.spawn_repeating("heartbeat", HEARTBEAT_INTERVAL, move || {
            let sessions = sessions.clone();
            let session = heartbeat_session.clone();
            async move { sessions.heartbeat_tick(&session).await }
        });

        let composer = self.composer.clone();
        let store = self.store.clone();
        tasks.spawn("commands", async move {
            while let Some(command) = commands.recv().await {
                match command {
                    ChatCommand::Submit => {
                        let draft = store.read(|snapshot| snapshot.composer.draft.clone());
                        composer.submit(&session.username, &draft).await;
                    }
                }
            }
        });

        log::info!("Chat client ready ({} background tasks)", tasks.len());
        *slot = Some(tasks);
        self.store.dispatch(LifecycleEvent::InitSucceeded);
        Ok(())
    }

    /// Cancels every background task and disposes the snapshot. Safe to call
    /// in any phase and any number of times; returns how many tasks this call
    /// cancelled.
    pub fn stop(&self) -> usize {
        let mut slot = self.lock_tasks();
        if self.store.dispatch(LifecycleEvent::Disposed) {
            log::info!("Chat client disposed");
        }
        slot.take().map_or(0, |mut tasks| tasks.cancel_all())
    }

    fn lock_tasks(&self) -> MutexGuard<'_, Option<TaskSet>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for LifecycleController {
    fn drop(&mut self) {
        self.stop();
    }
}

/// What the rendering layer holds: read access to the snapshot, draft
/// editing, and a way to request a send.
#[derive(Clone)]
pub struct ChatHandle {
    store: ChatStore,
    composer: Composer,
    commands: mpsc::Sender<ChatCommand>,
}

impl ChatHandle {
    pub fn snapshot(&self) -> ChatSnapshot {
        self.store.snapshot()
    }

    /// Writes the draft straight into the snapshot, so the next frame and a
    /// following `submit` both see it.
    pub fn edit_draft(&self, text: String) {
        self.composer.edit_draft(text);
    }

    /// Queues a send of the current draft. Returns `false` if the draft is not
    /// submittable right now, in which case nothing is queued.
    pub fn submit(&self) -> bool {
        let ready = self.store.read(|snapshot| {
            snapshot.phase == Phase::Ready && snapshot.composer.can_submit()
        });
        if !ready {
            return false;
        }
        match self.commands.try_send(ChatCommand::Submit) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Failed to queue submit command: {err}");
                false
            }
        }
    }
}
