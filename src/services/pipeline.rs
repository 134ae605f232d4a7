/// Movie list filtering and trailer attachment
///
/// Filters run per candidate in a fixed order (genre, year, rating) and
/// short-circuit on the first failing predicate. Trailer attachment is a
/// best-effort pass over the surviving movies.
use std::sync::Arc;

use crate::models::Movie;
use crate::services::providers::{CatalogProvider, TrailerProvider};

/// Raw filter parameters as supplied by the caller.
///
/// Values are kept as strings; numeric parsing happens per candidate so that
/// a malformed value drops candidates instead of erroring the request.
#[derive(Debug, Default, Clone)]
pub struct MovieFilters {
    pub genre: Option<String>,
    pub year: Option<String>,
    pub rating: Option<String>,
}

/// Applies genre, year, and rating predicates in order.
///
/// Empty parameter strings mean "no filter". A non-numeric genre or rating
/// drops every candidate it is applied to; a missing release date drops the
/// candidate whenever a year filter is present.
pub fn filter_movies(candidates: Vec<Movie>, filters: &MovieFilters) -> Vec<Movie> {
    let genre = filters.genre.as_deref().filter(|s| !s.is_empty());
    let year = filters.year.as_deref().filter(|s| !s.is_empty());
    let rating = filters.rating.as_deref().filter(|s| !s.is_empty());

    candidates
        .into_iter()
        .filter(|movie| {
            if let Some(genre) = genre {
                match genre.parse::<i64>() {
                    Ok(genre_id) if movie.genre_ids.contains(&genre_id) => {}
                    _ => return false,
                }
            }

            if let Some(year) = year {
                let Some(date) = movie.date() else {
                    return false;
                };
                if date.get(..4) != Some(year) {
                    return false;
                }
            }

            if let Some(rating) = rating {
                match rating.parse::<f64>() {
                    Ok(min) if movie.vote_average.unwrap_or(0.0) >= min => {}
                    _ => return false,
                }
            }

            true
        })
        .collect()
}

/// Attaches a trailer id to every movie that lacks one.
///
/// The catalog's per-movie trailer lookup is tried first; the text-search
/// resolver is the fallback. A failed lookup leaves `youtube_id` unset.
pub async fn attach_trailers(
    movies: &mut [Movie],
    catalog: Arc<dyn CatalogProvider>,
    resolver: Arc<dyn TrailerProvider>,
) {
    for movie in movies.iter_mut() {
        if movie.youtube_id.is_some() {
            continue;
        }

        let mut trailer = match movie.id {
            Some(movie_id) => catalog.movie_trailer(movie_id).await,
            None => None,
        };

        if trailer.is_none() {
            let query = format!("{} trailer", movie.display_title());
            trailer = resolver.find_trailer(&query).await;
        }

        movie.youtube_id = trailer;
    }
}
