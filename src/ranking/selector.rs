use super::error::RankingError;

/// Keeps the first `bound` items (all of them if there are fewer). No re-scoring.
pub fn select<T>(mut ordered: Vec<T>, bound: usize) -> Result<Vec<T>, RankingError> {
    if bound == 0 {
        return Err(RankingError::InvalidBound { bound });
    }
    ordered.truncate(bound);
    Ok(ordered)
}
