//! The post collection.
//!
//! [`PostStore`] is the only thing that reads or writes posts. Every
//! operation takes the lock once and holds it for its entire
//! read-modify-write, so a create, sort, update or delete is never observed
//! half-done and a create is visible to the very next list.

use parking_lot::Mutex;
use tracing::debug;

use crate::error::StoreError;
use crate::post::{ListParams, Post, PostInput, SearchParams, SortDirection, SortField};

/// A lock-guarded, memory-resident collection of posts.
pub struct PostStore {
    inner: Mutex<Collection>,
}

struct Collection {
    /// Resident order: insertion order until a sort rewrites it.
    posts: Vec<Post>,
    /// Highest id ever handed out, so a deleted id is never reassigned.
    last_id: u64,
}

impl Collection {
    fn generate_id(&self) -> u64 {
        let max = self.posts.iter().map(|p| p.id).max().unwrap_or(0);
        max.max(self.last_id) + 1
    }
}

impl PostStore {
    /// An empty store. The first post gets id `1`.
    pub fn new() -> Self {
        Self::with_posts(Vec::new())
    }

    /// A store holding `posts` in the given order.
    pub fn with_posts(posts: Vec<Post>) -> Self {
        let last_id = posts.iter().map(|p| p.id).max().unwrap_or(0);
        Self { inner: Mutex::new(Collection { posts, last_id }) }
    }

    /// The two posts the service starts with.
    pub fn seeded() -> Self {
        Self::with_posts(vec![
            Post::new(1, "First post", "This is the first post."),
            Post::new(2, "Second post", "This is the second post."),
        ])
    }

    pub fn len(&self) -> usize {
        self.inner.lock().posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().posts.is_empty()
    }

    /// Appends a new post and returns the whole collection.
    ///
    /// Both `title` and `content` must be present and non-empty. When either
    /// is missing the error names every missing field, not just the first.
    pub fn create(&self, input: PostInput) -> Result<Vec<Post>, StoreError> {
        let (title, content) = match (input.title(), input.content()) {
            (Some(title), Some(content)) => (title.to_owned(), content.to_owned()),
            (title, content) => {
                let mut missing = Vec::new();
                if title.is_none() {
                    missing.push("title");
                }
                if content.is_none() {
                    missing.push("content");
                }
                return Err(StoreError::MissingFields(missing));
            }
        };

        let mut inner = self.inner.lock();
        let id = inner.generate_id();
        inner.posts.push(Post { id, title, content });
        inner.last_id = id;
        debug!(id, "post created");

        Ok(inner.posts.clone())
    }

    /// Returns the collection, sorting it first when asked to.
    ///
    /// With no parameters the resident order is returned untouched. With
    /// both, the collection is stably sorted and the new order is kept for
    /// every later call. Supplying only one of the two is an error; supplying
    /// neither is not.
    pub fn list(&self, params: &ListParams) -> Result<Vec<Post>, StoreError> {
        let mut inner = self.inner.lock();

        match (params.sort.as_deref(), params.direction.as_deref()) {
            (None, None) => {}
            (Some(sort), Some(direction)) => {
                let field: SortField = sort.parse()?;
                let direction = SortDirection::from_param(direction);
                inner.posts.sort_by(|a, b| direction.apply(field.key(a).cmp(field.key(b))));
                debug!(?field, ?direction, "posts reordered");
            }
            (None, Some(_)) => return Err(StoreError::MissingFields(vec!["sort"])),
            (Some(_), None) => return Err(StoreError::MissingFields(vec!["direction"])),
        }

        Ok(inner.posts.clone())
    }

    /// Case-insensitive substring search, in resident order.
    ///
    /// A title query, when given, is the only thing consulted: posts are not
    /// tested against the content query even if their title does not match.
    /// The content query applies only when no title query was given.
    pub fn search(&self, params: &SearchParams) -> Result<Vec<Post>, StoreError> {
        let title = params.title_needle();
        let content = params.content_needle();

        let inner = self.inner.lock();
        let matches: Vec<Post> = inner
            .posts
            .iter()
            .filter(|post| match (&title, &content) {
                (Some(needle), _)    => post.title.to_lowercase().contains(needle.as_str()),
                (None, Some(needle)) => post.content.to_lowercase().contains(needle.as_str()),
                (None, None)         => false,
            })
            .cloned()
            .collect();

        if matches.is_empty() {
            return Err(StoreError::NoMatches);
        }
        Ok(matches)
    }

    /// Overwrites whichever of `title`/`content` are supplied and non-empty.
    pub fn update(&self, id: u64, input: PostInput) -> Result<Post, StoreError> {
        let mut inner = self.inner.lock();
        let post = inner
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if let Some(title) = input.title() {
            post.title = title.to_owned();
        }
        if let Some(content) = input.content() {
            post.content = content.to_owned();
        }
        debug!(id, "post updated");

        Ok(post.clone())
    }

    /// Removes the post with `id` and returns a confirmation message.
    pub fn delete(&self, id: u64) -> Result<String, StoreError> {
        let mut inner = self.inner.lock();
        let index = inner
            .posts
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        inner.posts.remove(index);
        debug!(id, "post deleted");

        Ok(format!("Post with id {id} has been deleted successfully."))
    }
}

impl Default for PostStore {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn titles(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.title.as_str()).collect()
    }

    fn sort(field: &str, direction: &str) -> ListParams {
        ListParams { sort: Some(field.into()), direction: Some(direction.into()) }
    }

    fn search(title: Option<&str>, content: Option<&str>) -> SearchParams {
        SearchParams {
            title: title.map(str::to_owned),
            content: content.map(str::to_owned),
        }
    }

    #[test]
    fn create_assigns_next_id_and_returns_everything() {
        let store = PostStore::seeded();
        let posts = store.create(PostInput::new(Some("Hello"), Some("World"))).unwrap();

        assert_eq!(posts.len(), 3);
        assert_eq!(posts[2], Post::new(3, "Hello", "World"));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn create_on_empty_store_starts_at_one() {
        let store = PostStore::new();
        assert!(store.is_empty());
        let posts = store.create(PostInput::new(Some("a"), Some("b"))).unwrap();
        assert_eq!(posts[0].id, 1);
    }

    #[test]
    fn create_reports_every_missing_field() {
        let store = PostStore::seeded();

        let err = store.create(PostInput::default()).unwrap_err();
        assert_eq!(err, StoreError::MissingFields(vec!["title", "content"]));

        let err = store.create(PostInput::new(Some(""), Some("body"))).unwrap_err();
        assert_eq!(err, StoreError::MissingFields(vec!["title"]));

        let err = store.create(PostInput::new(Some("t"), None)).unwrap_err();
        assert_eq!(err, StoreError::MissingFields(vec!["content"]));

        assert_eq!(store.len(), 2);
    }

    #[test]
    fn ids_are_never_reused() {
        let store = PostStore::seeded();
        let mut highest = 2;

        for round in 0..5 {
            let posts = store.create(PostInput::new(Some("t"), Some("c"))).unwrap();
            let id = posts.last().unwrap().id;
            assert!(id > highest, "round {round}: {id} <= {highest}");
            highest = id;
            // Deleting the newest post must not free its id.
            store.delete(id).unwrap();
        }

        store.delete(1).unwrap();
        store.delete(2).unwrap();
        let posts = store.create(PostInput::new(Some("t"), Some("c"))).unwrap();
        assert_eq!(posts[0].id, highest + 1);
    }

    #[test]
    fn listing_without_params_is_idempotent() {
        let store = PostStore::seeded();
        let first = store.list(&ListParams::default()).unwrap();
        let second = store.list(&ListParams::default()).unwrap();
        assert_eq!(first, second);
        assert_eq!(titles(&first), ["First post", "Second post"]);
    }

    #[test]
    fn sort_persists_as_resident_order() {
        let store = PostStore::seeded();

        let sorted = store.list(&sort("title", "desc")).unwrap();
        assert_eq!(titles(&sorted), ["Second post", "First post"]);

        let after = store.list(&ListParams::default()).unwrap();
        assert_eq!(titles(&after), ["Second post", "First post"]);

        let asc = store.list(&sort("content", "anything")).unwrap();
        assert_eq!(titles(&asc), ["First post", "Second post"]);
    }

    #[test]
    fn sort_is_stable() {
        let store = PostStore::with_posts(vec![
            Post::new(1, "b", "x"),
            Post::new(2, "a", "x"),
            Post::new(3, "b", "y"),
            Post::new(4, "a", "y"),
        ]);

        let asc = store.list(&sort("title", "asc")).unwrap();
        let ids: Vec<u64> = asc.iter().map(|p| p.id).collect();
        assert_eq!(ids, [2, 4, 1, 3]);

        let desc = store.list(&sort("title", "DESC")).unwrap();
        let ids: Vec<u64> = desc.iter().map(|p| p.id).collect();
        assert_eq!(ids, [1, 3, 2, 4]);
    }

    #[test]
    fn sort_rejects_unknown_field_without_reordering() {
        let store = PostStore::seeded();
        store.list(&sort("title", "desc")).unwrap();

        let err = store.list(&sort("Title", "asc")).unwrap_err();
        assert_eq!(err, StoreError::InvalidSortField("Title".into()));

        let after = store.list(&ListParams::default()).unwrap();
        assert_eq!(titles(&after), ["Second post", "First post"]);
    }

    #[test]
    fn partial_sort_params_are_an_error() {
        let store = PostStore::seeded();

        let only_sort = ListParams { sort: Some("title".into()), direction: None };
        assert_eq!(store.list(&only_sort).unwrap_err(), StoreError::MissingFields(vec!["direction"]));

        let only_direction = ListParams { sort: None, direction: Some("desc".into()) };
        assert_eq!(store.list(&only_direction).unwrap_err(), StoreError::MissingFields(vec!["sort"]));
    }

    #[test]
    fn search_by_title_is_case_insensitive() {
        let store = PostStore::seeded();
        let found = store.search(&search(Some("first"), None)).unwrap();
        assert_eq!(titles(&found), ["First post"]);

        let found = store.search(&search(Some("POST"), None)).unwrap();
        assert_eq!(titles(&found), ["First post", "Second post"]);
    }

    #[test]
    fn search_by_content() {
        let store = PostStore::seeded();
        let found = store.search(&search(None, Some("SECOND"))).unwrap();
        assert_eq!(titles(&found), ["Second post"]);
    }

    #[test]
    fn title_query_suppresses_content_query() {
        let store = PostStore::seeded();
        let err = store.search(&search(Some("zzz"), Some("second"))).unwrap_err();
        assert_eq!(err, StoreError::NoMatches);

        // An empty title query counts as absent.
        let found = store.search(&search(Some(""), Some("second"))).unwrap();
        assert_eq!(titles(&found), ["Second post"]);
    }

    #[test]
    fn search_without_queries_finds_nothing() {
        let store = PostStore::seeded();
        assert_eq!(store.search(&SearchParams::default()).unwrap_err(), StoreError::NoMatches);
    }

    #[test]
    fn search_follows_resident_order() {
        let store = PostStore::seeded();
        store.list(&sort("title", "desc")).unwrap();
        let found = store.search(&search(Some("post"), None)).unwrap();
        assert_eq!(titles(&found), ["Second post", "First post"]);
    }

    #[test]
    fn update_only_touches_supplied_fields() {
        let store = PostStore::seeded();

        let post = store.update(1, PostInput::new(None, Some("Rewritten"))).unwrap();
        assert_eq!(post, Post::new(1, "First post", "Rewritten"));

        let post = store.update(1, PostInput::new(Some("Renamed"), Some(""))).unwrap();
        assert_eq!(post, Post::new(1, "Renamed", "Rewritten"));

        let listed = store.list(&ListParams::default()).unwrap();
        assert_eq!(listed[0], post);
    }

    #[test]
    fn update_unknown_id() {
        let store = PostStore::seeded();
        let err = store.update(99, PostInput::new(Some("x"), None)).unwrap_err();
        assert_eq!(err, StoreError::NotFound("99".into()));
    }

    #[test]
    fn delete_removes_and_confirms() {
        let store = PostStore::seeded();
        let message = store.delete(1).unwrap();
        assert_eq!(message, "Post with id 1 has been deleted successfully.");
        assert_eq!(titles(&store.list(&ListParams::default()).unwrap()), ["Second post"]);

        assert_eq!(store.delete(1).unwrap_err(), StoreError::NotFound("1".into()));
    }

    #[test]
    fn concurrent_creates_get_distinct_ids() {
        const WRITERS: u64 = 16;
        let store = Arc::new(PostStore::seeded());

        let handles: Vec<_> = (0..WRITERS)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    let title = format!("writer {i}");
                    let posts = store.create(PostInput::new(Some(&title), Some("body"))).unwrap();
                    posts.iter().find(|p| p.title == title).unwrap().id
                })
            })
            .collect();

        let mut ids: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids, (3..3 + WRITERS).collect::<Vec<_>>());
        assert_eq!(store.len(), WRITERS as usize + 2);
    }
}
