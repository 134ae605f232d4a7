pub mod movie;
pub mod review;
pub mod user;

pub use movie::{
    Genre, GenreListResponse, Movie, MovieDetails, MovieListResponse, PersonCredits,
    PersonDetails, RegionProviders, TmdbReview, TmdbReviewList, Video, VideoList, WatchProviders,
};
pub use review::{Review, SentimentLabel};
pub use user::{User, WatchlistEntry, WatchlistSnapshot};
