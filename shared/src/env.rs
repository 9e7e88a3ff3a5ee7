/// Loads variables from a `.env` file in the working directory, if there is one.
/// Variables already set in the process environment win.
pub fn init() {
    dotenv::dotenv().ok();
}
