use crate::config::MenuConfig;
use crate::dataset::{LoadOptions, MenuDataset};
use crate::error::AppError;
use crate::features::{CategoryScheme, TextureClass};
use crate::scoring::{
    BodyGoal, ClusterAssigner, DegeneratePolicy, DiabetesModel, KMeans, MoodRating,
    VibrationalModel,
};
use crate::screens::body::{self, BodyReport};
use crate::screens::disorders::{self, Condition, DisorderReport};
use crate::screens::mood::{self, MoodReport, MoodRequest};
use crate::screens::soul::{self, SoulReport};
use crate::screens::texture::{self, TextureEdition, TextureReport};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Runs dashboard screens against the configured export. Every call reloads
/// the file; nothing is kept between requests.
#[derive(Clone)]
pub struct DashboardService {
    dataset_path: PathBuf,
    policy: DegeneratePolicy,
    assigner: Arc<dyn ClusterAssigner>,
}

impl std::fmt::Debug for DashboardService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardService")
            .field("dataset_path", &self.dataset_path)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl DashboardService {
    pub fn new(menu: &MenuConfig) -> Self {
        Self::with_assigner(
            menu.dataset_path.clone(),
            menu.normalization,
            Arc::new(KMeans::default()),
        )
    }

    pub fn with_assigner(
        dataset_path: PathBuf,
        policy: DegeneratePolicy,
        assigner: Arc<dyn ClusterAssigner>,
    ) -> Self {
        Self {
            dataset_path,
            policy,
            assigner,
        }
    }

    fn load(&self, options: &LoadOptions) -> Result<MenuDataset, AppError> {
        debug!(path = %self.dataset_path.display(), "loading dataset for request");
        Ok(MenuDataset::from_path(&self.dataset_path, options)?)
    }

    /// `model` defaults to the enhanced formula.
    pub fn vibrations(&self, model: Option<&str>) -> Result<SoulReport, AppError> {
        let model = match model {
            Some(raw) => VibrationalModel::parse(raw)?,
            None => VibrationalModel::default(),
        };
        let dataset = self.load(&soul::load_options(model))?;
        soul::vibrations(&dataset, model, self.policy)
    }

    pub fn texture(&self, texture: &str) -> Result<TextureReport, AppError> {
        let texture = TextureClass::parse(texture)?;
        let dataset = self.load(&texture::load_options())?;
        Ok(texture::texture_matches(
            &dataset,
            texture,
            TextureEdition::Dashboard,
        ))
    }

    pub fn mood(&self, rating: &str, category: &str) -> Result<MoodReport, AppError> {
        let rating = MoodRating::parse(rating)?;
        let category = CategoryScheme::TwoWay.parse_choice(category)?;
        let request = MoodRequest::dashboard(rating, category);
        let dataset = self.load(&mood::load_options(&request))?;
        mood::recommend(&dataset, &request, self.policy)
    }

    pub fn meals(&self, feeling: &str, meal_type: &str) -> Result<BodyReport, AppError> {
        let goal = BodyGoal::parse(feeling)?;
        let meal = CategoryScheme::TwoWay.parse_choice(meal_type)?;
        let dataset = self.load(&body::load_options())?;
        body::recommend_meals(&dataset, goal, meal, self.assigner.as_ref(), self.policy)
    }

    /// `diabetes_model` only matters for diabetes and defaults to the weighted edition.
    pub fn disorders(
        &self,
        condition: &str,
        diabetes_model: Option<&str>,
    ) -> Result<DisorderReport, AppError> {
        let condition = Condition::parse(condition)?;
        let model = match diabetes_model {
            Some(raw) => DiabetesModel::parse(raw)?,
            None => DiabetesModel::default(),
        };
        let dataset = self.load(&disorders::load_options(condition, model))?;
        disorders::recommend(&dataset, condition, model, self.policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InvalidUserInput;

    fn service(path: &str) -> DashboardService {
        DashboardService::with_assigner(
            PathBuf::from(path),
            DegeneratePolicy::Neutral,
            Arc::new(KMeans::default()),
        )
    }

    #[test]
    fn user_input_is_validated_before_the_file_is_read() {
        let service = service("./missing.csv");
        match service.texture("gooey") {
            Err(AppError::Input(InvalidUserInput::UnknownToken { field, .. })) => {
                assert_eq!(field, "texture")
            }
            other => panic!("expected invalid input, got {other:?}"),
        }
        assert!(matches!(
            service.mood("0", "veg"),
            Err(AppError::Input(InvalidUserInput::OutOfRange { .. }))
        ));
        assert!(matches!(
            service.mood("5", "vegan"),
            Err(AppError::Input(_))
        ));
    }

    #[test]
    fn missing_file_surfaces_as_dataset_error() {
        let service = service("./missing.csv");
        assert!(matches!(
            service.vibrations(None),
            Err(AppError::Dataset(_))
        ));
    }
}
