//! ProfileRepository - persists one role's profiles in the document store.
//!
//! Each user has at most one document per role collection, keyed by the
//! user id. Documents are decoded through the profile's serde schema, so a
//! malformed document surfaces as `StoreError::Decode` instead of a
//! partially defaulted profile.

use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::Stream;
use tracing::{debug, info, warn};

use crate::domain::foundation::UserId;
use crate::domain::profile::RoleProfile;
use crate::ports::{Collection, Document, DocumentKey, DocumentStore, StoreError, Subscription};

/// Reads, writes and observes profiles of type `P`.
pub struct ProfileRepository<P> {
    store: Arc<dyn DocumentStore>,
    _profile: PhantomData<fn() -> P>,
}

impl<P> Clone for ProfileRepository<P> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _profile: PhantomData,
        }
    }
}

impl<P: RoleProfile> ProfileRepository<P> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _profile: PhantomData,
        }
    }

    pub fn collection(&self) -> Collection {
        Collection::for_role(P::ROLE)
    }

    fn key(&self, user_id: &UserId) -> DocumentKey {
        DocumentKey::new(self.collection(), user_id.clone())
    }

    /// Writes the whole profile to `user_id`'s document.
    ///
    /// The key wins over whatever owner id the profile carries.
    pub async fn save(&self, user_id: &UserId, profile: &P) -> Result<(), StoreError> {
        let key = self.key(user_id);
        let mut owned = profile.clone();
        owned.set_user_id(user_id);
        let fields = owned.to_fields()?;

        self.store.set(&key, fields).await.map_err(|e| {
            warn!(%user_id, collection = %key.collection, error = %e, "profile save failed");
            e
        })?;

        info!(%user_id, collection = %key.collection, "profile saved");
        Ok(())
    }

    /// Reads the profile once. A user without a document gets the empty profile.
    pub async fn load(&self, user_id: &UserId) -> Result<P, StoreError> {
        let key = self.key(user_id);
        let document = self.store.get(&key).await?;
        decode_snapshot(user_id, document)
    }

    /// Opens a live view of the profile.
    ///
    /// The stream yields the current profile first and then every change.
    /// It ends after the first error; observe again to recover.
    pub async fn observe(&self, user_id: &UserId) -> Result<ProfileStream<P>, StoreError> {
        let key = self.key(user_id);
        let subscription = self.store.watch(&key).await.map_err(|e| {
            warn!(%user_id, collection = %key.collection, error = %e, "profile watch failed");
            e
        })?;
        debug!(%user_id, collection = %key.collection, "observing profile");
        Ok(ProfileStream {
            user_id: user_id.clone(),
            subscription,
            _profile: PhantomData,
        })
    }
}

fn decode_snapshot<P: RoleProfile>(
    user_id: &UserId,
    document: Option<Document>,
) -> Result<P, StoreError> {
    match document {
        None => Ok(P::empty(user_id)),
        Some(document) => {
            let mut profile = P::from_fields(&document.fields)?;
            profile.set_user_id(user_id);
            Ok(profile)
        }
    }
}

/// Live profile snapshots for one user.
///
/// Dropping the stream or calling [`ProfileStream::cancel`] releases the
/// store registration.
#[derive(Debug)]
pub struct ProfileStream<P> {
    user_id: UserId,
    subscription: Subscription<Option<Document>>,
    _profile: PhantomData<fn() -> P>,
}

impl<P: RoleProfile> ProfileStream<P> {
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Waits for the next snapshot. `None` once the stream has ended.
    pub async fn next_profile(&mut self) -> Option<Result<P, StoreError>> {
        let item = self.subscription.next_item().await?;
        Some(self.decode(item))
    }

    pub fn cancel(&mut self) {
        self.subscription.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.subscription.is_finished()
    }

    fn decode(&mut self, item: Result<Option<Document>, StoreError>) -> Result<P, StoreError> {
        let result = item.and_then(|document| decode_snapshot(&self.user_id, document));
        if let Err(e) = &result {
            warn!(user_id = %self.user_id, error = %e, "profile stream ended");
            self.subscription.cancel();
        }
        result
    }
}

impl<P: RoleProfile> Stream for ProfileStream<P> {
    type Item = Result<P, StoreError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        match Pin::new(&mut this.subscription).poll_next(cx) {
            Poll::Ready(Some(item)) => Poll::Ready(Some(this.decode(item))),
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryDocumentStore;
    use crate::domain::profile::{StudentProfile, TutorProfile};
    use futures::StreamExt;
    use serde_json::json;

    fn setup() -> (Arc<InMemoryDocumentStore>, ProfileRepository<StudentProfile>) {
        let store = Arc::new(InMemoryDocumentStore::new());
        let repository = ProfileRepository::new(store.clone() as Arc<dyn DocumentStore>);
        (store, repository)
    }

    fn uid(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn ana(user: &UserId) -> StudentProfile {
        let mut profile = StudentProfile::empty(user);
        profile.name = "Ana".to_string();
        profile.matric_number = "A123456".to_string();
        profile.course = "Bachelor of Computer Science".to_string();
        profile
    }

    #[tokio::test]
    async fn load_without_document_returns_empty_profile() {
        let (_, repository) = setup();
        let profile = repository.load(&uid("u1")).await.unwrap();
        assert_eq!(profile, StudentProfile::empty(&uid("u1")));
    }

    #[tokio::test]
    async fn save_then_load_returns_the_saved_profile() {
        let (_, repository) = setup();
        let user = uid("u1");

        repository.save(&user, &ana(&user)).await.unwrap();

        assert_eq!(repository.load(&user).await.unwrap(), ana(&user));
    }

    #[tokio::test]
    async fn key_overrides_owner_id_in_profile() {
        let (store, repository) = setup();
        let user = uid("u1");
        let foreign = ana(&uid("someone-else"));

        repository.save(&user, &foreign).await.unwrap();

        let key = DocumentKey::new(Collection::StudentProfiles, user.clone());
        let stored = store.get(&key).await.unwrap().unwrap();
        assert_eq!(stored.fields["userId"], json!("u1"));
        assert_eq!(repository.load(&user).await.unwrap().user_id, "u1");
    }

    #[tokio::test]
    async fn repeated_identical_saves_leave_store_unchanged() {
        let (store, repository) = setup();
        let user = uid("u1");
        let key = DocumentKey::new(Collection::StudentProfiles, user.clone());

        repository.save(&user, &ana(&user)).await.unwrap();
        let first = store.get(&key).await.unwrap();
        repository.save(&user, &ana(&user)).await.unwrap();

        assert_eq!(store.get(&key).await.unwrap(), first);
        assert_eq!(store.document_count().await, 1);
    }

    #[tokio::test]
    async fn roles_use_separate_collections() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let students = ProfileRepository::<StudentProfile>::new(store.clone());
        let tutors = ProfileRepository::<TutorProfile>::new(store.clone());
        let user = uid("u1");

        students.save(&user, &ana(&user)).await.unwrap();

        assert_eq!(tutors.load(&user).await.unwrap(), TutorProfile::empty(&user));
        assert_eq!(tutors.collection().name(), "tutorProfiles");
    }

    #[tokio::test]
    async fn malformed_document_fails_to_load() {
        let (store, repository) = setup();
        let key = DocumentKey::new(Collection::StudentProfiles, uid("u1"));
        let fields = match json!({ "userId": "u1", "name": 42 }) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        store.set(&key, fields).await.unwrap();

        let err = repository.load(&uid("u1")).await.unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
    }

    #[tokio::test]
    async fn load_propagates_store_failures() {
        let (store, repository) = setup();
        store.go_offline(StoreError::unavailable("no network")).await;

        let err = repository.load(&uid("u1")).await.unwrap_err();
        assert_eq!(err, StoreError::unavailable("no network"));
    }

    #[tokio::test]
    async fn observe_emits_empty_then_saved_profile() {
        let (_, repository) = setup();
        let user = uid("u1");
        let mut stream = repository.observe(&user).await.unwrap();

        let first = stream.next_profile().await.unwrap().unwrap();
        assert_eq!(first, StudentProfile::empty(&user));

        repository.save(&user, &ana(&user)).await.unwrap();
        let second = stream.next().await.unwrap().unwrap();
        assert_eq!(second, ana(&user));
    }

    #[tokio::test]
    async fn observe_ends_after_the_first_error() {
        let (store, repository) = setup();
        let user = uid("u1");
        let key = DocumentKey::new(Collection::StudentProfiles, user.clone());
        let mut stream = repository.observe(&user).await.unwrap();
        stream.next_profile().await.unwrap().unwrap();

        store
            .fail_watchers(&key, StoreError::permission_denied("signed out"))
            .await;

        assert!(stream.next_profile().await.unwrap().is_err());
        assert!(stream.next_profile().await.is_none());
        assert!(stream.is_finished());
    }

    #[tokio::test]
    async fn undecodable_snapshot_ends_the_stream() {
        let (store, repository) = setup();
        let user = uid("u1");
        let key = DocumentKey::new(Collection::StudentProfiles, user.clone());
        let mut stream = repository.observe(&user).await.unwrap();
        stream.next_profile().await.unwrap().unwrap();

        let fields = match json!({ "userId": "u1" }) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        store.set(&key, fields).await.unwrap();

        assert!(matches!(
            stream.next_profile().await.unwrap(),
            Err(StoreError::Decode(_))
        ));
        assert!(stream.next_profile().await.is_none());
    }
}
