use std::path::Path;

use rand::{Rng, distr::Alphanumeric};
use tracing::debug;

use crate::{clients::storage::FileStore, error::Result, models::fcm::Payload};

/// Most messages FCM accepts in a single batch call.
pub const MAX_PAYLOAD: usize = 500;

pub const SUBREQUEST_BOUNDARY: &str = "subrequest_boundary";

pub fn batch_file_name() -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(5)
        .map(char::from)
        .collect();

    format!("batch_request_{}.txt", suffix)
}

/// One embedded `messages:send` request of the batch body.
pub fn subrequest_part(project_id: &str, json: &str) -> String {
    format!(
        "--{boundary}\n\
         Content-Type: application/http\n\
         Content-Transfer-Encoding: binary\n\
         \n\
         POST /v1/projects/{project_id}/messages:send\n\
         Content-Type: application/json\n\
         accept: application/json\n\
         \n\
         {json}\n",
        boundary = SUBREQUEST_BOUNDARY,
    )
}

pub fn closing_boundary() -> String {
    format!("--{}--", SUBREQUEST_BOUNDARY)
}

/// Appends every payload as a sub-request, in queue order, then closes the body.
pub async fn write_batch_body<S: FileStore>(
    file_store: &S,
    path: &Path,
    project_id: &str,
    payloads: &[Payload],
) -> Result<()> {
    for (index, payload) in payloads.iter().enumerate() {
        let json = payload.to_json()?;
        file_store
            .append(path, &subrequest_part(project_id, &json))
            .await?;

        debug!(index, "Sub-request appended to batch file");
    }

    file_store.append(path, &closing_boundary()).await?;

    Ok(())
}
