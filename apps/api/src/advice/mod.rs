// Career advice endpoints: course/job recommendations and job-posting summaries.
// Free-text answers with a fixed offline text on any AI failure.

pub mod handlers;
pub mod prompts;
pub mod service;
