pub mod sqlite_document_store;
pub mod postgres_document_store;

use rand::{distributions::Alphanumeric, Rng};

const DOCUMENT_ID_LEN: usize = 20;

/// Auto-generated document id, 20 alphanumeric characters.
pub(crate) fn generate_document_id() -> String {
    rand::thread_rng().sample_iter(&Alphanumeric).take(DOCUMENT_ID_LEN).map(char::from).collect()
}
