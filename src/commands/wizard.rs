//! Interactive terminal wizard: collects the brand brief step by step,
//! runs the generation pipeline, and writes the export files.

use crate::config::Config;
use crate::export;
use crate::moodboard::MoodboardAnalyzer;
use crate::providers;
use crate::tokens::TokenGenerator;
use crate::wizard::{
    Niche, PipelineOutcome, StepFields, Theme, Typography, WizardDriver, WizardStep,
};
use anyhow::{Context, Result};
use base64::Engine as _;
use console::style;
use dialoguer::{Input, MultiSelect, Select};
use std::path::Path;
use strum::IntoEnumIterator;

pub async fn run(config: &Config, moodboard: Option<&Path>, out_dir: &Path) -> Result<()> {
    let provider = providers::create_provider(config);
    let analyzer = MoodboardAnalyzer::new(provider.clone());
    let generator = TokenGenerator::new(provider);

    let mut driver = WizardDriver::new();

    println!();
    println!(
        "  {} {}",
        style("TokenForge").white().bold(),
        style("— brand design tokens from a guided brief").dim()
    );

    prompt_identity(&mut driver)?;
    driver.advance()?;

    prompt_style(&mut driver)?;
    driver.advance()?;

    if let Some(path) = moodboard {
        let data_url = read_image_as_data_url(path)?;
        println!("  {} analyzing moodboard...", style("›").cyan());
        driver.attach_moodboard(&analyzer, data_url).await;
        if let Some(notice) = driver.moodboard_notice() {
            println!("  {} {notice}", style("!").yellow().bold());
        }
        if let Some(analysis) = driver.analysis() {
            println!(
                "  {} main color: {} ({}), style: {}",
                style("✓").green().bold(),
                analysis.main_color.name,
                analysis.main_color.hex,
                analysis.style
            );
            println!(
                "  {} palette: {}",
                style("✓").green().bold(),
                analysis.colors.to_comma_list()
            );
        }
    }
    driver.advance()?;

    println!("  {} generating design tokens...", style("›").cyan());
    driver.run_generation(&generator).await;
    debug_assert_eq!(driver.step(), WizardStep::Preview);

    match driver.outcome() {
        Some(PipelineOutcome::Ready(tokens)) => {
            let tokens = tokens.clone();
            print_preview(&tokens);
            write_exports(&tokens, out_dir)?;
            Ok(())
        }
        Some(PipelineOutcome::Failed(message)) => {
            println!("  {} {message}", style("✗").red().bold());
            anyhow::bail!("{message}");
        }
        None => anyhow::bail!("generation produced no result"),
    }
}

fn prompt_identity(driver: &mut WizardDriver) -> Result<()> {
    println!();
    println!("  {}", style("Step 1 — Brand identity").white().bold());

    let brand_name: String = Input::new()
        .with_prompt("  Brand name")
        .interact_text()?;
    let purpose: String = Input::new()
        .with_prompt("  What does the brand do?")
        .interact_text()?;
    let values: String = Input::new()
        .with_prompt("  Core values (comma separated)")
        .interact_text()?;

    let niches: Vec<Niche> = Niche::iter().collect();
    let niche_labels: Vec<String> = niches.iter().map(ToString::to_string).collect();
    let picked = MultiSelect::new()
        .with_prompt("  Niche (space to toggle, enter to confirm)")
        .items(&niche_labels)
        .interact()?;
    let niche: Vec<Niche> = picked.into_iter().map(|i| niches[i]).collect();

    driver.set_fields(StepFields::Identity {
        brand_name,
        purpose,
        values,
        niche,
    });
    Ok(())
}

fn prompt_style(driver: &mut WizardDriver) -> Result<()> {
    println!();
    println!("  {}", style("Step 2 — Style preferences").white().bold());

    let themes: Vec<Theme> = Theme::iter().collect();
    let theme_labels: Vec<String> = themes.iter().map(ToString::to_string).collect();
    let theme_idx = Select::new()
        .with_prompt("  Visual theme")
        .items(&theme_labels)
        .default(0)
        .interact()?;

    let warmth = prompt_slider("  Warmth (0-100)")?;
    let brightness = prompt_slider("  Brightness (0-100)")?;

    let typographies: Vec<Typography> = Typography::iter().collect();
    let typography_labels: Vec<String> = typographies.iter().map(ToString::to_string).collect();
    let typography_idx = Select::new()
        .with_prompt("  Typography")
        .items(&typography_labels)
        .default(0)
        .interact()?;

    driver.set_fields(StepFields::Style {
        theme: themes[theme_idx],
        warmth,
        brightness,
        typography: typographies[typography_idx],
    });
    Ok(())
}

fn prompt_slider(prompt: &str) -> Result<u8> {
    let value: u8 = Input::new()
        .with_prompt(prompt)
        .default(40)
        .validate_with(|v: &u8| {
            if *v <= 100 {
                Ok(())
            } else {
                Err("must be between 0 and 100")
            }
        })
        .interact_text()?;
    Ok(value)
}

/// Read an image file and wrap it as a base64 data URL, the shape the
/// provider expects for vision input.
fn read_image_as_data_url(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read moodboard image {}", path.display()))?;
    let mime = match path.extension().and_then(|e| e.to_str()) {
        Some("jpg" | "jpeg") => "image/jpeg",
        _ => "image/png",
    };
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{mime};base64,{encoded}"))
}

fn print_preview(tokens: &crate::tokens::TokenSet) {
    println!();
    println!("  {}", style("Preview").white().bold());
    for (category, entries) in [
        ("color", &tokens.color),
        ("font", &tokens.font),
        ("spacing", &tokens.spacing),
        ("radius", &tokens.radius),
    ] {
        for (key, value) in entries {
            println!("  {} {category}.{key} = {value}", style("·").dim());
        }
    }
    for (i, prompt) in tokens.illustrations.iter().enumerate() {
        println!("  {} illustration {} — {prompt}", style("·").dim(), i + 1);
    }
}

fn write_exports(tokens: &crate::tokens::TokenSet, out_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let json_path = out_dir.join("design-tokens.json");
    let nested = serde_json::to_string_pretty(&export::to_nested_format(tokens))?;
    std::fs::write(&json_path, nested)
        .with_context(|| format!("failed to write {}", json_path.display()))?;

    let css_path = out_dir.join("design-tokens.css");
    std::fs::write(&css_path, export::to_stylesheet(tokens))
        .with_context(|| format!("failed to write {}", css_path.display()))?;

    println!();
    println!(
        "  {} wrote {}",
        style("✓").green().bold(),
        json_path.display()
    );
    println!(
        "  {} wrote {}",
        style("✓").green().bold(),
        css_path.display()
    );
    println!();
    println!("{}", export::to_raw_json(tokens));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_tokens() -> crate::tokens::TokenSet {
        serde_json::from_str(
            r##"{
                "color": { "primary": "#3D5AFE", "background": "#F8F9FB", "text": "#23272F" },
                "font": { "family": "Inter", "base": "16px", "h1": "32px" },
                "spacing": { "sm": "8px", "md": "16px", "lg": "32px" },
                "radius": { "md": "12px" },
                "illustrations": ["a", "b", "c"]
            }"##,
        )
        .unwrap()
    }

    #[test]
    fn exports_land_in_the_out_dir() {
        let tmp = TempDir::new().unwrap();
        write_exports(&sample_tokens(), tmp.path()).unwrap();

        let json = std::fs::read_to_string(tmp.path().join("design-tokens.json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["color"]["primary"]["value"], "#3D5AFE");

        let css = std::fs::read_to_string(tmp.path().join("design-tokens.css")).unwrap();
        assert!(css.starts_with(":root {"));
        assert!(css.contains("--radius-md: 12px;"));
    }

    #[test]
    fn out_dir_is_created_when_missing() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("a/b");
        write_exports(&sample_tokens(), &nested).unwrap();
        assert!(nested.join("design-tokens.json").exists());
    }

    #[test]
    fn png_and_jpeg_extensions_pick_the_right_mime() {
        let tmp = TempDir::new().unwrap();
        let png = tmp.path().join("board.png");
        std::fs::write(&png, b"fakepng").unwrap();
        assert!(read_image_as_data_url(&png)
            .unwrap()
            .starts_with("data:image/png;base64,"));

        let jpg = tmp.path().join("board.jpeg");
        std::fs::write(&jpg, b"fakejpg").unwrap();
        assert!(read_image_as_data_url(&jpg)
            .unwrap()
            .starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn missing_image_file_is_an_error() {
        assert!(read_image_as_data_url(Path::new("/nonexistent/board.png")).is_err());
    }
}
