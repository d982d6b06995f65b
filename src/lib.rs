//! Headline analyzer: sentiment polarity and named entities for tables of
//! news headlines.
//!
//! The library reads plain or gzip CSV tables, picks the headline column,
//! drops rows without text, annotates every remaining row, and writes the
//! annotated table back out as `news_headlines_nlp_results.csv`.

pub mod config;
pub mod models;
pub mod services;
pub mod table;
