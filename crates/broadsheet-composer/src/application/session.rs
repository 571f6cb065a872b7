//! The editing context of the write and edit pages.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use broadsheet_articles::application::command_handlers::{
    handle_edit_article, handle_publish_article,
};
use broadsheet_articles::domain::commands::{EditArticle, PublishArticle};
use broadsheet_articles::domain::document::ContentDocument;
use broadsheet_content::domain::markup::render_markup;
use broadsheet_core::clock::Clock;
use broadsheet_core::error::DomainError;
use broadsheet_core::identity::{CurrentUser, IdentityProvider};
use broadsheet_core::repository::DocumentRepository;
use broadsheet_core::subscription::Subscription;
use broadsheet_media::application::coordinator::UploadCoordinator;
use broadsheet_media::domain::file::MediaFile;
use tracing::{info, warn};
use uuid::Uuid;

use super::binding::SelectionBinding;
use crate::domain::editor::Editor;
use crate::domain::errors::ComposeError;
use crate::domain::surface::EditorSurface;

/// One author's editing session over one document.
///
/// The session belongs to the signed-in user it was opened for. Signing out
/// or switching accounts locks it: every later upload or publish fails with
/// `DomainError::Unauthenticated`.
pub struct ComposerSession {
    editor: Rc<RefCell<Editor>>,
    author: CurrentUser,
    article_id: Option<String>,
    locked: Arc<AtomicBool>,
    uploads: UploadCoordinator,
    clock: Arc<dyn Clock>,
    repo: Arc<dyn DocumentRepository>,
    _identity: Subscription,
}

impl ComposerSession {
    /// Opens a session for a new article.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Unauthenticated` if nobody is signed in.
    pub fn compose(
        identity: &dyn IdentityProvider,
        uploads: UploadCoordinator,
        clock: Arc<dyn Clock>,
        repo: Arc<dyn DocumentRepository>,
    ) -> Result<Self, DomainError> {
        Self::open(identity, Editor::default(), None, uploads, clock, repo)
    }

    /// Opens a session editing an existing article.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Unauthenticated` if nobody is signed in or the
    /// signed-in user is not the article's author.
    pub fn edit(
        article: &ContentDocument,
        identity: &dyn IdentityProvider,
        uploads: UploadCoordinator,
        clock: Arc<dyn Clock>,
        repo: Arc<dyn DocumentRepository>,
    ) -> Result<Self, DomainError> {
        if identity.current_user().map(|user| user.key).as_deref() != Some(article.author.as_str())
        {
            return Err(DomainError::Unauthenticated);
        }
        Self::open(
            identity,
            Editor::from_markup(&article.content),
            Some(article.id.clone()),
            uploads,
            clock,
            repo,
        )
    }

    fn open(
        identity: &dyn IdentityProvider,
        editor: Editor,
        article_id: Option<String>,
        uploads: UploadCoordinator,
        clock: Arc<dyn Clock>,
        repo: Arc<dyn DocumentRepository>,
    ) -> Result<Self, DomainError> {
        let author = identity
            .current_user()
            .ok_or(DomainError::Unauthenticated)?;

        let locked = Arc::new(AtomicBool::new(false));
        let lock = Arc::clone(&locked);
        let key = author.key.clone();
        let subscription = identity.subscribe(Box::new(move |user: Option<&CurrentUser>| {
            if user.map(|user| user.key.as_str()) != Some(key.as_str()) {
                warn!(author = %key, "author signed out, locking composer");
                lock.store(true, Ordering::SeqCst);
            }
        }));

        Ok(Self {
            editor: Rc::new(RefCell::new(editor)),
            author,
            article_id,
            locked,
            uploads,
            clock,
            repo,
            _identity: subscription,
        })
    }

    /// The editor, shared with input bindings.
    #[must_use]
    pub fn editor(&self) -> Rc<RefCell<Editor>> {
        Rc::clone(&self.editor)
    }

    /// Binds the editor's media selection to `surface`.
    #[must_use]
    pub fn bind(&self, surface: &EditorSurface) -> SelectionBinding {
        SelectionBinding::attach(surface, &self.editor)
    }

    /// The author the session was opened for.
    #[must_use]
    pub fn author(&self) -> &CurrentUser {
        &self.author
    }

    /// Id of the article, once it exists.
    #[must_use]
    pub fn article_id(&self) -> Option<&str> {
        self.article_id.as_deref()
    }

    /// Whether the author has signed out since the session was opened.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::SeqCst)
    }

    fn ensure_unlocked(&self) -> Result<(), DomainError> {
        if self.is_locked() {
            return Err(DomainError::Unauthenticated);
        }
        Ok(())
    }

    /// Uploads `files` as one batch and embeds them, in selection order, at
    /// the cursor current when the batch settles. Returns the new cursor.
    ///
    /// On any error the document is left untouched. A batch that settles
    /// after the session locked is discarded.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Unauthenticated` if the session is locked before
    /// or while the batch uploads, or the batch's `UploadError`.
    pub async fn insert_images(&self, files: Vec<MediaFile>) -> Result<usize, ComposeError> {
        self.ensure_unlocked()?;
        let urls = self.uploads.submit(files).await?;
        self.ensure_unlocked()?;
        let cursor = self.editor.borrow_mut().insert_embeds(&urls);
        info!(embeds = urls.len(), cursor, "images embedded");
        Ok(cursor)
    }

    /// Publishes the document under `title`, or saves it if it has already
    /// been published. Returns the article id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Unauthenticated` if the session is locked,
    /// `DomainError::Validation` for a blank title or body, or the store's
    /// error.
    pub async fn publish(&mut self, title: &str) -> Result<String, ComposeError> {
        self.ensure_unlocked()?;
        let content = render_markup(self.editor.borrow().content());

        if let Some(article_id) = &self.article_id {
            let command = EditArticle {
                correlation_id: Uuid::new_v4(),
                article_id: article_id.clone(),
                title: title.to_owned(),
                content,
            };
            handle_edit_article(&command, self.clock.as_ref(), self.repo.as_ref()).await?;
            return Ok(article_id.clone());
        }

        let command = PublishArticle {
            correlation_id: Uuid::new_v4(),
            title: title.to_owned(),
            content,
            author: self.author.key.clone(),
        };
        let article_id =
            handle_publish_article(&command, self.clock.as_ref(), self.repo.as_ref()).await?;
        self.article_id = Some(article_id.clone());
        Ok(article_id)
    }
}

impl std::fmt::Debug for ComposerSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComposerSession")
            .field("author", &self.author.key)
            .field("article_id", &self.article_id)
            .field("locked", &self.is_locked())
            .finish_non_exhaustive()
    }
}
