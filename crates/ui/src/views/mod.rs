mod completion;
mod quiz;
mod toast;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use completion::CompletionView;
pub use quiz::QuizView;
pub use toast::Toast;
