//! Interactive classification session
//!
//! Holds the config, the data source and a `TableCache` for as long as the
//! user keeps classifying. Each classification is one user action: failures
//! are printed and the session goes on, except configuration errors, which
//! end it.

use crate::classifier::RecipeClassifier;
use crate::cli::TableArgs;
use crate::config::Config;
use crate::dataset::{CacheStatus, DataSource, RecipeTable, Sampler, TableCache};
use crate::error::{ChefSortError, Result};
use chefsort_common::{recipe_text, Classification, Recipe};
use dialoguer::{Confirm, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

pub struct Session {
    config: Config,
    source: DataSource,
    cache: TableCache,
}

impl Session {
    pub fn new(config: Config, table: &TableArgs) -> Result<Self> {
        let size = table.sample.unwrap_or(config.sample_size);
        let sampler = Sampler::new(size, table.seed)?;
        let source = DataSource::from_args(table.file.clone(), &config);

        Ok(Self {
            config,
            source,
            cache: TableCache::new(sampler),
        })
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Current sample, reloaded if the file changed
    pub fn table(&mut self) -> Result<Arc<RecipeTable>> {
        let (table, status) = self.cache.get_or_load(self.source.path())?;
        match status {
            CacheStatus::Hit => {}
            CacheStatus::Loaded => println!(
                "✔ {} recipes sampled from {} ({} usable rows, {} skipped)",
                table.recipes.len(),
                table.source.display(),
                table.total_rows,
                table.dropped_rows
            ),
            CacheStatus::Reloaded => println!(
                "↻ {} changed, resampled {} recipes",
                table.source.display(),
                table.recipes.len()
            ),
        }
        Ok(table)
    }

    /// Recipe by title, or chosen interactively when no title is given
    ///
    /// `None` means the user cancelled the selection.
    pub fn select_recipe(&mut self, title: Option<&str>) -> Result<Option<Recipe>> {
        let table = self.table()?;

        if let Some(title) = title {
            return find_recipe(&table, title).map(Some);
        }

        let titles = table.titles();
        let picked = Select::new()
            .with_prompt("Select a recipe to classify (Esc to quit)")
            .items(&titles)
            .default(0)
            .interact_opt()?;

        Ok(picked.map(|idx| table.recipes[idx].clone()))
    }

    pub fn list(&mut self) -> Result<()> {
        let table = self.table()?;
        println!();
        for (i, title) in table.titles().iter().enumerate() {
            println!("  {:>2}) {}", i + 1, title);
        }
        Ok(())
    }

    pub fn show(&mut self, title: Option<&str>) -> Result<()> {
        if let Some(recipe) = self.select_recipe(title)? {
            print_recipe(&recipe);
        }
        Ok(())
    }

    /// Classify by title once, or loop over interactive selections
    pub async fn classify(&mut self, title: Option<&str>) -> Result<()> {
        let classifier = RecipeClassifier::new(&self.config)?;

        if let Some(title) = title {
            let classification = self.classify_title(&classifier, title).await?;
            println!("{}", format_classification(&classification));
            return Ok(());
        }

        loop {
            let Some(recipe) = self.select_recipe(None)? else {
                break;
            };
            print_recipe(&recipe);

            let outcome = self.classify_recipe(&classifier, &recipe).await;
            report_outcome(outcome)?;

            let again = Confirm::new()
                .with_prompt("Classify another recipe?")
                .default(true)
                .interact()?;
            if !again {
                break;
            }
        }

        Ok(())
    }

    /// Look up one recipe in the sample, print it and classify it
    pub async fn classify_title(
        &mut self,
        classifier: &RecipeClassifier,
        title: &str,
    ) -> Result<Classification> {
        let table = self.table()?;
        let recipe = find_recipe(&table, title)?;
        print_recipe(&recipe);
        self.classify_recipe(classifier, &recipe).await
    }

    async fn classify_recipe(
        &self,
        classifier: &RecipeClassifier,
        recipe: &Recipe,
    ) -> Result<Classification> {
        let api_key = self.config.resolve_api_key()?;

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!("Sending to {}...", classifier.model()));
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = classifier.classify(&api_key, recipe).await;
        spinner.finish_and_clear();
        result
    }
}

/// First recipe in the sample with this title
pub fn find_recipe(table: &RecipeTable, title: &str) -> Result<Recipe> {
    table
        .find_by_title(title)
        .cloned()
        .ok_or_else(|| ChefSortError::RecipeNotFound(title.to_string()))
}

/// Print one interactive classification outcome
///
/// Configuration errors are handed back so the session ends with a failure
/// status; any other error is shown and the session goes on.
pub fn report_outcome(outcome: Result<Classification>) -> Result<()> {
    match outcome {
        Ok(classification) => println!("{}", format_classification(&classification)),
        Err(e) if e.is_configuration() => return Err(e),
        Err(e) => println!("✖ {}", e),
    }
    Ok(())
}

fn print_recipe(recipe: &Recipe) {
    println!("\n📋 Recipe Content\n{}\n", recipe_text(recipe));
}

/// Text shown to the user for a classification
pub fn format_classification(classification: &Classification) -> String {
    match classification {
        Classification::Structured(result) => {
            let json = serde_json::to_string_pretty(result)
                .unwrap_or_else(|_| format!("{:?}", result.fields()));
            format!("✔ AI Classification Result:\n{}", json)
        }
        Classification::RawTextFallback { text } => {
            format!("⚠ AI response was not valid JSON, showing it as-is:\n{}", text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chefsort_common::parse_classification;
    use std::path::PathBuf;

    fn table() -> RecipeTable {
        RecipeTable {
            source: PathBuf::from("test.csv"),
            recipes: vec![
                Recipe::new("Pancakes", "flour"),
                Recipe::new("Salad", "lettuce"),
                Recipe::new("Pancakes", "buckwheat"),
            ],
            total_rows: 3,
            dropped_rows: 0,
        }
    }

    #[test]
    fn test_find_recipe_first_match() {
        assert_eq!(find_recipe(&table(), "Pancakes").unwrap().ingredients, "flour");
    }

    #[test]
    fn test_find_recipe_not_in_sample() {
        let result = find_recipe(&table(), "Lasagna");
        assert!(matches!(result, Err(ChefSortError::RecipeNotFound(t)) if t == "Lasagna"));
    }

    #[test]
    fn test_format_structured() {
        let classification = parse_classification(r#"{"cuisine": "Italian"}"#);
        let text = format_classification(&classification);
        assert!(text.starts_with("✔ AI Classification Result:"));
        assert!(text.contains("\"cuisine\": \"Italian\""));
    }

    #[test]
    fn test_format_fallback_keeps_text() {
        let classification = parse_classification("Probably Italian.");
        let text = format_classification(&classification);
        assert!(text.contains("not valid JSON"));
        assert!(text.ends_with("Probably Italian."));
    }

    #[test]
    fn test_report_outcome_configuration_error_ends_session() {
        let result = report_outcome(Err(ChefSortError::MissingCredential));
        assert!(matches!(result, Err(ChefSortError::MissingCredential)));
    }

    #[test]
    fn test_report_outcome_remote_error_continues() {
        let outcome = Err(ChefSortError::RemoteService {
            status: 500,
            body: "upstream".to_string(),
        });
        assert!(report_outcome(outcome).is_ok());
        assert!(report_outcome(Ok(parse_classification("Italian"))).is_ok());
    }

    #[test]
    fn test_session_rejects_zero_sample() {
        let args = TableArgs {
            file: None,
            sample: Some(0),
            seed: None,
        };
        assert!(matches!(
            Session::new(Config::default(), &args),
            Err(ChefSortError::Config(_))
        ));
    }

    #[test]
    fn test_session_uses_configured_data_file() {
        let args = TableArgs {
            file: None,
            sample: None,
            seed: None,
        };
        let session = Session::new(Config::default(), &args).unwrap();
        assert_eq!(session.source(), &DataSource::Local(PathBuf::from("EPICurious.csv")));
    }
}
