use crate::infra::value_or_prompt;
use clap::Args;
use happy_menu::config::{AppConfig, MenuConfig};
use happy_menu::dataset::MenuDataset;
use happy_menu::error::AppError;
use happy_menu::features::{CategoryScheme, DietaryCategory, TextureClass};
use happy_menu::scoring::{BodyGoal, DiabetesModel, KMeans, MoodRating, VibrationalModel};
use happy_menu::screens::body::{self, BodyReport};
use happy_menu::screens::disorders::{self, Condition, DisorderReport};
use happy_menu::screens::mood::{self, MoodReport, MoodRequest};
use happy_menu::screens::soul::{self, SoulReport};
use happy_menu::screens::texture::{self, TextureEdition, TextureReport};
use happy_menu::screens::views::VibrationalRow;
use happy_menu::telemetry::{self, LogSink};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;

#[derive(Args, Debug, Default, Clone)]
pub(crate) struct SourceArgs {
    /// Menu export to read instead of MENU_CSV_PATH
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct SoulArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    /// Vibrational formula edition (classic or enhanced)
    #[arg(long, default_value = "enhanced")]
    pub(crate) model: String,
}

#[derive(Args, Debug)]
pub(crate) struct TextureArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    /// Texture to list (crispy, chewy, soft or smooth); prompted when omitted
    #[arg(long)]
    pub(crate) texture: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct MoodArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    /// Mood rating from 1 to 10; prompted when omitted
    #[arg(long)]
    pub(crate) rating: Option<String>,
    /// Dietary category (veg, non-veg or vegan); prompted when omitted
    #[arg(long)]
    pub(crate) category: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct BodyArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    /// Desired feeling (energetic, lean, satiated or avoid_bloating); prompted when omitted
    #[arg(long)]
    pub(crate) feeling: Option<String>,
    /// Meal type (veg or non-veg); prompted when omitted
    #[arg(long)]
    pub(crate) meal_type: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct DisordersArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    /// Condition to screen for; prompted when omitted
    #[arg(long)]
    pub(crate) condition: Option<String>,
    /// Diabetes scoring edition (weighted or fiber_adjusted)
    #[arg(long)]
    pub(crate) diabetes_model: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct AllArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    /// Texture for the texture screen; prompted when omitted
    #[arg(long)]
    pub(crate) texture: Option<String>,
}

/// Loads configuration, applies `--csv` and sends logs to stderr so the
/// report owns stdout.
fn prepare(source: SourceArgs) -> Result<MenuConfig, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(csv) = source.csv {
        config.menu.dataset_path = csv;
    }
    telemetry::init(&config.telemetry, LogSink::Stderr)?;
    debug!(dataset = %config.menu.dataset_path.display(), "console configured");
    Ok(config.menu)
}

pub(crate) fn run_soul(args: SoulArgs) -> Result<(), AppError> {
    let menu = prepare(args.source)?;
    soul_screen(&menu, &args.model, &mut io::stdout().lock())
}

pub(crate) fn run_texture(args: TextureArgs) -> Result<(), AppError> {
    let menu = prepare(args.source)?;
    let texture = value_or_prompt(args.texture, &texture_prompt())?;
    texture_screen(&menu, &texture, &mut io::stdout().lock())
}

pub(crate) fn run_mood(args: MoodArgs) -> Result<(), AppError> {
    let menu = prepare(args.source)?;
    let rating = value_or_prompt(args.rating, "How are you feeling on a scale of 1-10?")?;
    let category = value_or_prompt(
        args.category,
        &format!(
            "Dietary preference ({})",
            DietaryCategory::TOKENS.join(", ")
        ),
    )?;
    mood_screen(&menu, &rating, &category, &mut io::stdout().lock())
}

pub(crate) fn run_body(args: BodyArgs) -> Result<(), AppError> {
    let menu = prepare(args.source)?;
    let feeling = value_or_prompt(
        args.feeling,
        &format!("How do you want to feel? ({})", BodyGoal::TOKENS.join(", ")),
    )?;
    let meal_type = value_or_prompt(args.meal_type, "Meal type (veg, non-veg)")?;
    body_screen(&menu, &feeling, &meal_type, &mut io::stdout().lock())
}

pub(crate) fn run_disorders(args: DisordersArgs) -> Result<(), AppError> {
    let menu = prepare(args.source)?;
    let condition = value_or_prompt(
        args.condition,
        &format!("Condition ({})", Condition::TOKENS.join(", ")),
    )?;
    disorders_screen(
        &menu,
        &condition,
        args.diabetes_model.as_deref(),
        &mut io::stdout().lock(),
    )
}

/// Soul screen with the default model, then the texture screen.
pub(crate) fn run_all(args: AllArgs) -> Result<(), AppError> {
    let menu = prepare(args.source)?;
    soul_screen(&menu, "enhanced", &mut io::stdout().lock())?;
    let texture = value_or_prompt(args.texture, &texture_prompt())?;
    let mut out = io::stdout().lock();
    writeln!(out)?;
    texture_screen(&menu, &texture, &mut out)
}

fn texture_prompt() -> String {
    format!("Texture ({})", TextureClass::TOKENS.join(", "))
}

fn soul_screen<W: Write>(menu: &MenuConfig, model: &str, out: &mut W) -> Result<(), AppError> {
    let model = VibrationalModel::parse(model)?;
    let dataset = MenuDataset::from_path(&menu.dataset_path, &soul::load_options(model))?;
    let report = soul::vibrations(&dataset, model, menu.normalization)?;
    render_soul(&report, out)?;
    Ok(())
}

fn texture_screen<W: Write>(menu: &MenuConfig, texture: &str, out: &mut W) -> Result<(), AppError> {
    let texture = TextureClass::parse(texture)?;
    let dataset = MenuDataset::from_path(&menu.dataset_path, &texture::load_options())?;
    let report = texture::texture_matches(&dataset, texture, TextureEdition::Console);
    render_texture(&report, out)?;
    Ok(())
}

fn mood_screen<W: Write>(
    menu: &MenuConfig,
    rating: &str,
    category: &str,
    out: &mut W,
) -> Result<(), AppError> {
    let rating = MoodRating::parse(rating)?;
    let category = CategoryScheme::ThreeWay.parse_choice(category)?;
    let request = MoodRequest::console(rating, category);
    let dataset = MenuDataset::from_path(&menu.dataset_path, &mood::load_options(&request))?;
    let report = mood::recommend(&dataset, &request, menu.normalization)?;
    render_mood(&report, out)?;
    Ok(())
}

fn body_screen<W: Write>(
    menu: &MenuConfig,
    feeling: &str,
    meal_type: &str,
    out: &mut W,
) -> Result<(), AppError> {
    let goal = BodyGoal::parse(feeling)?;
    let meal = CategoryScheme::TwoWay.parse_choice(meal_type)?;
    let dataset = MenuDataset::from_path(&menu.dataset_path, &body::load_options())?;
    let report = body::recommend_meals(
        &dataset,
        goal,
        meal,
        &KMeans::default(),
        menu.normalization,
    )?;
    render_body(&report, out)?;
    Ok(())
}

fn disorders_screen<W: Write>(
    menu: &MenuConfig,
    condition: &str,
    diabetes_model: Option<&str>,
    out: &mut W,
) -> Result<(), AppError> {
    let condition = Condition::parse(condition)?;
    let model = match diabetes_model {
        Some(raw) => DiabetesModel::parse(raw)?,
        None => DiabetesModel::default(),
    };
    let dataset = MenuDataset::from_path(
        &menu.dataset_path,
        &disorders::load_options(condition, model),
    )?;
    let report = disorders::recommend(&dataset, condition, model, menu.normalization)?;
    render_disorders(&report, out)?;
    Ok(())
}

fn model_name(model: VibrationalModel) -> &'static str {
    match model {
        VibrationalModel::Classic => "classic",
        VibrationalModel::Enhanced => "enhanced",
    }
}

fn render_vibrational_rows<W: Write>(rows: &[VibrationalRow], out: &mut W) -> io::Result<()> {
    for (rank, row) in rows.iter().enumerate() {
        writeln!(
            out,
            "  {:>2}. {} [{}] score {:.4}",
            rank + 1,
            row.item.menu_item,
            row.item.menu_category,
            row.vibrational_score
        )?;
    }
    Ok(())
}

fn render_soul<W: Write>(report: &SoulReport, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "Top {} vegetarian items by vibrational score ({} model)",
        report.top_vegetarian.len(),
        model_name(report.model)
    )?;
    render_vibrational_rows(&report.top_vegetarian, out)?;
    writeln!(
        out,
        "\nLowest {} items by vibrational score",
        report.lowest.len()
    )?;
    render_vibrational_rows(&report.lowest, out)
}

fn render_texture<W: Write>(report: &TextureReport, out: &mut W) -> io::Result<()> {
    let texture = report.texture.label().to_lowercase();
    if report.items.is_empty() {
        writeln!(out, "No items found with a {texture} texture.")?;
        return Ok(());
    }
    writeln!(
        out,
        "Items with a {texture} texture (feeling: {})",
        report.feeling
    )?;
    for row in &report.items {
        writeln!(out, "- {} ({})", row.item.menu_item, row.item.menu_category)?;
    }
    Ok(())
}

fn render_mood<W: Write>(report: &MoodReport, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "Mood {}/10 ({}): top {} picks",
        report.rating.value(),
        report.mood_label,
        report.category.label()
    )?;
    if report.items.is_empty() {
        writeln!(out, "  No {} items on this menu.", report.category.label())?;
        return Ok(());
    }
    for row in &report.items {
        writeln!(
            out,
            "- {} | {} carbs (quality {:.1}) | {:.0} kcal | protein {:.1} g | carbs {:.1} g | sugars {:.1} g | score {:.2}",
            row.item.menu_item,
            row.carb_type.label(),
            row.carb_quality_score,
            row.energy_kcal,
            row.protein_g,
            row.total_carbohydrate_g,
            row.total_sugars_g,
            row.score
        )?;
    }
    Ok(())
}

fn render_body<W: Write>(report: &BodyReport, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "{} meals ({})",
        report.feeling.label(),
        report.meal_type.label()
    )?;
    for (rank, row) in report.items.iter().enumerate() {
        writeln!(
            out,
            "  {}. {} [{}] score {:.4} cluster {}",
            rank + 1,
            row.item.menu_item,
            row.item.menu_category,
            row.score,
            row.cluster
        )?;
    }
    Ok(())
}

fn render_disorders<W: Write>(report: &DisorderReport, out: &mut W) -> io::Result<()> {
    writeln!(out, "Recommendations for {}", report.label)?;
    if report.items.is_empty() {
        writeln!(out, "  Nothing on this menu fits.")?;
        return Ok(());
    }
    for row in &report.items {
        write!(
            out,
            "- {} | {:.0} kcal | sugars {:.1} g | carbs {:.1} g | protein {:.1} g",
            row.item.menu_item,
            row.energy_kcal,
            row.total_sugars_g,
            row.total_carbohydrate_g,
            row.protein_g
        )?;
        match row.score {
            Some(score) => writeln!(out, " | score {score:.4}")?,
            None => writeln!(out)?,
        }
    }
    Ok(())
}
