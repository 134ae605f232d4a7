pub mod movie_detail;
pub mod pipeline;
pub mod providers;
pub mod sentiment;
pub mod wordcloud;
