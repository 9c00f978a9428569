//! ProfileController - view-state owner for the profile editing screens.
//!
//! The controller is an actor: a single task owns the [`ProfileViewState`]
//! and is the only writer. Handle methods enqueue commands; the
//! subscription task and save tasks report back on a second channel.
//! Readers get snapshots through a `watch` channel.
//!
//! ```text
//! handle ──Command──►┐
//!                    ├──► actor ──watch──► UI
//! tasks  ──Event────►┘      │
//!   ▲                       │ spawn
//!   └── observe / save ◄────┘
//! ```
//!
//! Every subscription gets a new generation number and every observed user
//! a new session number. Snapshots from an older generation and save
//! results from an older session are dropped, so a superseded subscription
//! can never overwrite the current user's state.
//!
//! At most one save runs at a time. A save requested while another is in
//! flight is queued and runs once the first completes, writing whatever
//! profile is held by then. Every edit bumps a revision counter, and a
//! completed save only clears `has_unsaved_changes` if no edit arrived
//! after it started.

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::foundation::{StateMachine, UserId};
use crate::domain::profile::RoleProfile;
use crate::ports::StoreError;

use super::{LoadPhase, ProfileRepository, ProfileViewState};

type SaveAck = oneshot::Sender<Result<(), StoreError>>;

enum Command<P> {
    Start(UserId),
    Edit(P),
    Save(Option<SaveAck>),
    Shutdown(oneshot::Sender<()>),
}

enum Event<P> {
    Snapshot {
        generation: u64,
        result: Result<P, StoreError>,
    },
    Saved {
        session: u64,
        result: Result<(), StoreError>,
    },
}

/// Handle to a running profile controller.
///
/// Cloning gives another handle to the same controller. The controller
/// shuts down when [`ProfileController::shutdown`] is called or the last
/// handle is dropped.
pub struct ProfileController<P: RoleProfile> {
    commands: mpsc::UnboundedSender<Command<P>>,
    state: watch::Receiver<ProfileViewState<P>>,
}

impl<P: RoleProfile> Clone for ProfileController<P> {
    fn clone(&self) -> Self {
        Self {
            commands: self.commands.clone(),
            state: self.state.clone(),
        }
    }
}

impl<P: RoleProfile> ProfileController<P> {
    /// Spawns the controller task. Must be called inside a tokio runtime.
    pub fn spawn(repository: ProfileRepository<P>) -> Self {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (events, event_rx) = mpsc::unbounded_channel();
        let (publisher, state) = watch::channel(ProfileViewState::initial());

        let actor = Actor {
            repository,
            state: ProfileViewState::initial(),
            publisher,
            events,
            generation: 0,
            session: 0,
            revision: 0,
            subscription: None,
            in_flight: None,
            pending_save: None,
            retired_saves: Vec::new(),
        };
        tokio::spawn(actor.run(command_rx, event_rx));

        Self { commands, state }
    }

    /// Starts observing `user_id`'s profile.
    ///
    /// No-op while a live subscription for the same user exists.
    pub fn start(&self, user_id: UserId) {
        self.send(Command::Start(user_id));
    }

    /// Replaces the held profile with the user's edit.
    pub fn edit(&self, profile: P) {
        self.send(Command::Edit(profile));
    }

    /// Saves the held profile for the observed user.
    pub fn save(&self) {
        self.send(Command::Save(None));
    }

    /// Saves the held profile and waits for the write to finish.
    ///
    /// Returns `None` when nothing was written for this request: no user
    /// was observed, the user changed first, or the controller stopped.
    pub async fn save_and_wait(&self) -> Option<Result<(), StoreError>> {
        let (ack, done) = oneshot::channel();
        if self.commands.send(Command::Save(Some(ack))).is_err() {
            return None;
        }
        done.await.ok()
    }

    /// Stops the controller, releasing the subscription and abandoning
    /// in-flight saves. Returns once the controller has stopped.
    pub async fn shutdown(&self) {
        let (ack, done) = oneshot::channel();
        if self.commands.send(Command::Shutdown(ack)).is_ok() {
            let _ = done.await;
        }
    }

    /// Current view state.
    pub fn state(&self) -> ProfileViewState<P> {
        self.state.borrow().clone()
    }

    /// Receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<ProfileViewState<P>> {
        self.state.clone()
    }

    /// Waits until the state satisfies `predicate` and returns it.
    ///
    /// Returns `None` if the controller stopped first.
    pub async fn wait_until(
        &self,
        predicate: impl FnMut(&ProfileViewState<P>) -> bool,
    ) -> Option<ProfileViewState<P>> {
        let mut receiver = self.state.clone();
        receiver.wait_for(predicate).await.ok().map(|state| state.clone())
    }

    fn send(&self, command: Command<P>) {
        if self.commands.send(command).is_err() {
            debug!("profile controller already stopped, command dropped");
        }
    }
}

struct Actor<P: RoleProfile> {
    repository: ProfileRepository<P>,
    state: ProfileViewState<P>,
    publisher: watch::Sender<ProfileViewState<P>>,
    events: mpsc::UnboundedSender<Event<P>>,
    generation: u64,
    session: u64,
    /// Bumped on every edit.
    revision: u64,
    /// Task forwarding the current subscription; `None` when dead.
    subscription: Option<JoinHandle<()>>,
    in_flight: Option<InFlightSave>,
    /// Callers of a save requested while another was running.
    pending_save: Option<Vec<SaveAck>>,
    /// Saves for a previous user, left to finish but never applied.
    retired_saves: Vec<JoinHandle<()>>,
}

struct InFlightSave {
    task: JoinHandle<()>,
    /// Revision of the profile being written.
    revision: u64,
    waiters: Vec<SaveAck>,
}

impl<P: RoleProfile> Actor<P> {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command<P>>,
        mut events: mpsc::UnboundedReceiver<Event<P>>,
    ) {
        loop {
            tokio::select! {
                biased;

                command = commands.recv() => match command {
                    Some(Command::Shutdown(ack)) => {
                        self.teardown();
                        let _ = ack.send(());
                        break;
                    }
                    Some(command) => self.handle_command(command),
                    None => {
                        self.teardown();
                        break;
                    }
                },
                Some(event) = events.recv() => self.handle_event(event),
            }
        }
        debug!("profile controller stopped");
    }

    fn handle_command(&mut self, command: Command<P>) {
        match command {
            Command::Start(user_id) => self.start(user_id),
            Command::Edit(profile) => {
                self.revision += 1;
                self.state.profile = profile;
                self.state.has_unsaved_changes = true;
                self.publish();
            }
            Command::Save(ack) => self.save(ack),
            Command::Shutdown(_) => {}
        }
    }

    fn handle_event(&mut self, event: Event<P>) {
        match event {
            Event::Snapshot { generation, .. } if generation != self.generation => {
                debug!(generation, current = self.generation, "dropping stale snapshot");
            }
            Event::Saved { session, .. } if session != self.session => {
                debug!(session, current = self.session, "dropping stale save result");
            }
            Event::Snapshot { result, .. } => self.apply_snapshot(result),
            Event::Saved { result, .. } => self.apply_save(result),
        }
    }

    fn start(&mut self, user_id: UserId) {
        let same_user = self.state.user_id.as_ref() == Some(&user_id);
        let live = self
            .subscription
            .as_ref()
            .is_some_and(|task| !task.is_finished());
        if same_user && live {
            debug!(%user_id, "already observing profile");
            return;
        }

        self.release_subscription();
        self.generation += 1;
        if !same_user {
            // A save for the previous user can no longer land in this state.
            self.session += 1;
            self.retire_saves();
            self.state.is_saving = false;
            self.state.has_unsaved_changes = false;
        }
        self.state.user_id = Some(user_id.clone());
        self.state.error = None;
        self.enter(LoadPhase::Loading);
        self.publish();

        let role = P::ROLE;
        info!(%user_id, %role, generation = self.generation, "observing profile");
        self.subscription = Some(tokio::spawn(forward_snapshots(
            self.repository.clone(),
            user_id,
            self.generation,
            self.events.clone(),
        )));
    }

    fn save(&mut self, ack: Option<SaveAck>) {
        if self.state.user_id.is_none() {
            debug!("save ignored, no user");
            return;
        }

        self.state.is_saving = true;
        self.state.error = None;
        if self.in_flight.is_some() {
            debug!("save queued behind the running one");
            self.pending_save.get_or_insert_with(Vec::new).extend(ack);
        } else {
            self.spawn_save(ack.into_iter().collect());
        }
        self.publish();
    }

    fn spawn_save(&mut self, waiters: Vec<SaveAck>) {
        let Some(user_id) = self.state.user_id.clone() else {
            return;
        };
        let repository = self.repository.clone();
        let profile = self.state.profile.clone();
        let events = self.events.clone();
        let session = self.session;
        let task = tokio::spawn(async move {
            let result = repository.save(&user_id, &profile).await;
            let _ = events.send(Event::Saved { session, result });
        });
        self.in_flight = Some(InFlightSave {
            task,
            revision: self.revision,
            waiters,
        });
    }

    fn apply_snapshot(&mut self, result: Result<P, StoreError>) {
        match result {
            Ok(profile) => {
                if self.state.has_unsaved_changes {
                    debug!("keeping local edits over incoming snapshot");
                } else {
                    self.state.profile = profile;
                }
                self.enter(LoadPhase::Ready);
            }
            Err(e) => {
                warn!(user_id = ?self.state.user_id, error = %e, "profile subscription failed");
                self.state.error = Some(e.to_string());
                self.enter(LoadPhase::Error);
                // The stream has ended; the next start resubscribes.
                self.release_subscription();
            }
        }
        self.publish();
    }

    fn apply_save(&mut self, result: Result<(), StoreError>) {
        let Some(finished) = self.in_flight.take() else {
            return;
        };
        match &result {
            Ok(()) if finished.revision == self.revision => {
                self.state.has_unsaved_changes = false;
            }
            Ok(()) => debug!("profile edited while saving, changes still unsaved"),
            Err(e) => self.state.error = Some(e.to_string()),
        }
        match self.pending_save.take() {
            Some(waiters) => {
                self.state.error = None;
                self.spawn_save(waiters);
            }
            None => self.state.is_saving = false,
        }
        self.publish();

        // Callers see the published state once their ack arrives.
        for waiter in finished.waiters {
            let _ = waiter.send(result.clone());
        }
    }

    fn enter(&mut self, next: LoadPhase) {
        match self.state.phase.transition_to(next) {
            Ok(phase) => self.state.phase = phase,
            Err(e) => warn!(error = %e, "ignoring load phase change"),
        }
    }

    fn release_subscription(&mut self) {
        if let Some(task) = self.subscription.take() {
            // Dropping the stream inside the task cancels the store watch.
            task.abort();
        }
    }

    /// Lets the previous user's save finish without tracking its result.
    fn retire_saves(&mut self) {
        self.retired_saves.retain(|task| !task.is_finished());
        if let Some(save) = self.in_flight.take() {
            self.retired_saves.push(save.task);
        }
        self.pending_save = None;
    }

    fn teardown(&mut self) {
        self.release_subscription();
        self.retire_saves();
        for task in self.retired_saves.drain(..) {
            task.abort();
        }
        // Anything still queued belongs to a dead generation.
        self.generation += 1;
        self.session += 1;
    }

    fn publish(&self) {
        self.publisher.send_replace(self.state.clone());
    }
}

/// Pumps one profile stream into the actor until it ends.
async fn forward_snapshots<P: RoleProfile>(
    repository: ProfileRepository<P>,
    user_id: UserId,
    generation: u64,
    events: mpsc::UnboundedSender<Event<P>>,
) {
    let mut stream = match repository.observe(&user_id).await {
        Ok(stream) => stream,
        Err(e) => {
            let _ = events.send(Event::Snapshot {
                generation,
                result: Err(e),
            });
            return;
        }
    };

    while let Some(result) = stream.next_profile().await {
        let failed = result.is_err();
        if events.send(Event::Snapshot { generation, result }).is_err() || failed {
            break;
        }
    }
}
