use clap::Args;

use crate::{
    api::projects,
    commands::Context,
    error::Result,
    services::catalog::{filter, Dimension, FilterSpec},
    views,
};

/// Catalog constraints. Repeat a flag to allow several values.
#[derive(Debug, Default, Args)]
pub struct FilterArgs {
    #[arg(long)]
    pub price_min: Option<u64>,
    #[arg(long)]
    pub price_max: Option<u64>,
    #[arg(long)]
    pub area_min: Option<f64>,
    #[arg(long)]
    pub area_max: Option<f64>,
    #[arg(long = "material")]
    pub materials: Vec<String>,
    #[arg(long = "floors")]
    pub floors: Vec<u32>,
    #[arg(long = "rooms")]
    pub rooms: Vec<u32>,
    #[arg(long = "bedrooms")]
    pub bedrooms: Vec<u32>,
    #[arg(long = "bathrooms")]
    pub bathrooms: Vec<u32>,
}

impl FilterArgs {
    /// Apply the flags on top of the default filter, the same way a user
    /// would drag sliders and toggle buttons.
    pub fn to_spec(&self) -> FilterSpec {
        let mut spec = FilterSpec::default();

        // A lone bound drags the default other end along so it is never crossed.
        match (self.price_min, self.price_max) {
            (None, None) => {}
            (Some(min), None) => spec.set_price_range(min, spec.price_range.max().max(min)),
            (None, Some(max)) => spec.set_price_range(spec.price_range.min().min(max), max),
            (Some(min), Some(max)) => spec.set_price_range(min, max),
        }
        match (self.area_min, self.area_max) {
            (None, None) => {}
            (Some(min), None) => spec.set_area_range(min, spec.area_range.max().max(min)),
            (None, Some(max)) => spec.set_area_range(spec.area_range.min().min(max), max),
            (Some(min), Some(max)) => spec.set_area_range(min, max),
        }

        for material in &self.materials {
            if !spec.materials.contains(material.as_str()) {
                spec.toggle_material(material.as_str());
            }
        }
        for (dimension, values) in [
            (Dimension::Floors, &self.floors),
            (Dimension::Rooms, &self.rooms),
            (Dimension::Bedrooms, &self.bedrooms),
            (Dimension::Bathrooms, &self.bathrooms),
        ] {
            for value in values {
                if !spec.selection(dimension).contains(value) {
                    spec.toggle(dimension, *value);
                }
            }
        }
        spec
    }
}

pub async fn list(ctx: &Context, args: FilterArgs) -> Result<String> {
    let catalog = projects::list_projects(&ctx.client, ctx.session.session(), &[]).await?;
    let spec = args.to_spec();
    let visible = filter(&catalog, &spec);
    tracing::debug!(total = catalog.len(), shown = visible.len(), "Catalog filtered");
    Ok(views::catalog(&visible, &spec))
}

pub async fn show(ctx: &Context, id: i64) -> Result<String> {
    let project = projects::get_project(&ctx.client, ctx.session.session(), id).await?;
    Ok(views::project_template(&project))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_give_default_spec() {
        assert!(FilterArgs::default().to_spec().is_default());
    }

    #[test]
    fn one_sided_range_keeps_other_default_end() {
        let args = FilterArgs {
            price_max: Some(10_000_000),
            area_min: Some(100.0),
            ..FilterArgs::default()
        };
        let spec = args.to_spec();
        assert_eq!(spec.price_range.min(), 7_000_000);
        assert_eq!(spec.price_range.max(), 10_000_000);
        assert_eq!(spec.area_range.min(), 100.0);
        assert_eq!(spec.area_range.max(), 900.0);
    }

    fn priced(id: i64, price: u64, area: f64) -> crate::models::ProjectRecord {
        crate::models::ProjectRecord {
            id,
            name: format!("Дом {id}"),
            image: String::new(),
            floors: 1,
            material: "Кирпич".to_string(),
            area,
            rooms: 3,
            bedrooms: 2,
            bathrooms: 1,
            price,
        }
    }

    #[test]
    fn lone_minimum_above_default_maximum_is_not_crossed() {
        let args = FilterArgs {
            price_min: Some(20_000_000),
            ..FilterArgs::default()
        };
        let spec = args.to_spec();
        assert_eq!(spec.price_range.min(), 20_000_000);
        assert_eq!(spec.price_range.max(), 20_000_000);

        let catalog = vec![priced(9, 17_000_000, 100.0), priced(10, 20_000_000, 100.0)];
        let shown: Vec<i64> = filter(&catalog, &spec).iter().map(|r| r.id).collect();
        assert_eq!(shown, vec![10]);
    }

    #[test]
    fn lone_maximum_below_default_minimum_is_not_crossed() {
        let args = FilterArgs {
            price_max: Some(5_000_000),
            area_max: Some(40.0),
            ..FilterArgs::default()
        };
        let spec = args.to_spec();
        assert_eq!(spec.price_range.min(), 5_000_000);
        assert_eq!(spec.price_range.max(), 5_000_000);
        assert_eq!(spec.area_range.min(), 40.0);

        let catalog = vec![priced(1, 5_000_000, 40.0), priced(2, 7_000_000, 40.0)];
        let shown: Vec<i64> = filter(&catalog, &spec).iter().map(|r| r.id).collect();
        assert_eq!(shown, vec![1]);
    }

    #[test]
    fn lone_area_minimum_above_default_maximum_is_not_crossed() {
        let args = FilterArgs {
            area_min: Some(1000.0),
            ..FilterArgs::default()
        };
        let spec = args.to_spec();
        assert_eq!(spec.area_range.min(), 1000.0);
        assert_eq!(spec.area_range.max(), 1000.0);
    }

    #[test]
    fn repeated_values_are_selected_once() {
        let args = FilterArgs {
            materials: vec!["Монолит".to_string(), "Монолит".to_string()],
            floors: vec![2, 1, 2],
            ..FilterArgs::default()
        };
        let spec = args.to_spec();
        assert_eq!(spec.materials.values(), &["Монолит".to_string()]);
        assert_eq!(spec.floors.values(), &[2, 1]);
    }
}
