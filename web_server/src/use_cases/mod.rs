pub mod compare;
pub mod export;
pub mod history;
pub mod optimize;
pub mod process_batch;

#[cfg(test)]
pub(crate) mod test_support;

pub use compare::compare_texts;
pub use export::{history_to_csv, txt_file_name};
pub use history::HistoryUseCase;
pub use optimize::optimize_image;
pub use process_batch::{ProcessBatchUseCase, cache_key, is_allowed_file};
