use dashmap::DashMap;
use magik_core::OpenedDocument;
use tower_lsp_server::ls_types::Uri;

/// The authoritative set of open documents, keyed by URI.
///
/// Notification handling is the only writer. Writes swap whole
/// [`OpenedDocument`] values, so a reader either sees the previous snapshot or
/// the new one and never waits longer than the swap itself. Readers get a
/// cloned handle and release the map lock before doing any work with it.
///
/// # Examples
///
/// ```
/// use magik_core::ContentClassifier;
/// use magik_lsp::document::DocumentStore;
/// use tower_lsp_server::ls_types::Uri;
///
/// let store = DocumentStore::new();
/// let uri = Uri::from_file_path("/src/a.magik").unwrap();
/// let doc = ContentClassifier::default()
///     .classify("magik", uri.clone(), "_package sw\n".into())
///     .unwrap();
///
/// store.put(uri.clone(), doc);
/// assert_eq!(store.get(&uri).unwrap().text(), "_package sw\n");
///
/// store.remove(&uri);
/// assert!(store.get(&uri).is_none());
/// ```
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<Uri, OpenedDocument>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the document for `uri`.
    ///
    /// Returns the replaced snapshot, if any.
    pub fn put(&self, uri: Uri, document: OpenedDocument) -> Option<OpenedDocument> {
        self.documents.insert(uri, document)
    }

    /// Returns a snapshot of the current document for `uri`.
    ///
    /// `None` is not an error: the document may have been closed while a
    /// request for it was in flight.
    pub fn get(&self, uri: &Uri) -> Option<OpenedDocument> {
        self.documents.get(uri).map(|entry| entry.value().clone())
    }

    /// Removes the document for `uri` and returns it.
    pub fn remove(&self, uri: &Uri) -> Option<OpenedDocument> {
        self.documents.remove(uri).map(|(_, document)| document)
    }

    pub fn contains(&self, uri: &Uri) -> bool {
        self.documents.contains_key(uri)
    }

    /// Returns the number of open documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
