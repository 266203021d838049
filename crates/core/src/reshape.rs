use crate::error::SearchError;
use crate::models::{ColumnarResponse, HitMetadata, SearchResultItem};
use crate::text::{audio_url, capitalize_words, caption_url};

/// Zips the first batch of a columnar response into display rows, keeping
/// the service's ranking order.
pub fn reshape_response(response: ColumnarResponse) -> Result<Vec<SearchResultItem>, SearchError> {
    let ColumnarResponse {
        ids,
        metadatas,
        documents,
        distances,
        scores,
    } = response;

    let Some(ids) = ids.into_iter().next() else {
        return Ok(Vec::new());
    };
    let metadatas = first_batch(metadatas, "metadatas", ids.len())?;
    let documents = first_batch(documents, "documents", ids.len())?;
    let distances = optional_batch(distances);
    let scores = optional_batch(scores);

    let rows = ids
        .into_iter()
        .zip(metadatas)
        .zip(documents)
        .enumerate()
        .map(|(index, ((id, metadata), document))| {
            let metadata = metadata.unwrap_or_default();
            build_item(
                id.to_string(),
                metadata,
                document.unwrap_or_default(),
                distances.get(index).copied().flatten(),
                scores.get(index).copied().flatten(),
            )
        })
        .collect();

    Ok(rows)
}

fn build_item(
    id: String,
    metadata: HitMetadata,
    content_snippet: String,
    distance: Option<f64>,
    rerank_score: Option<f64>,
) -> SearchResultItem {
    let HitMetadata {
        title,
        preacher,
        section,
        video_url,
        mp4_url,
    } = metadata;

    SearchResultItem {
        id,
        title: capitalize_words(title.as_deref().unwrap_or_default()),
        preacher_name: capitalize_words(preacher.as_deref().unwrap_or_default()),
        section_name: capitalize_words(section.as_deref().unwrap_or_default()),
        video_url,
        media_audio_url: mp4_url.as_deref().and_then(audio_url),
        caption_url: mp4_url.as_deref().and_then(caption_url),
        media_video_url: mp4_url,
        content_snippet,
        distance,
        rerank_score,
    }
}

fn first_batch<T>(column: Vec<Vec<T>>, name: &str, expected: usize) -> Result<Vec<T>, SearchError> {
    let batch = column.into_iter().next().ok_or_else(|| {
        SearchError::MalformedResponse(format!("`{name}` has no result batch"))
    })?;

    if batch.len() != expected {
        return Err(SearchError::MalformedResponse(format!(
            "`{name}` has {} entries but `ids` has {expected}",
            batch.len()
        )));
    }

    Ok(batch)
}

fn optional_batch(column: Option<Vec<Vec<Option<f64>>>>) -> Vec<Option<f64>> {
    column
        .and_then(|batches| batches.into_iter().next())
        .unwrap_or_default()
}
