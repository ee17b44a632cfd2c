//! Accumulates source rows into an [`InvestmentDocument`]

use std::collections::{BTreeMap, HashMap};

use crate::config::ReshapeConfig;

use super::fields::{calculate_progress, category_id, extract_location, parse_number, project_id};
use super::models::{Category, InvestmentDocument, Project, SourceRow};

pub struct DocumentBuilder<'a> {
    settings: &'a ReshapeConfig,
    categories: Vec<Category>,
    /// title -> category id
    category_ids: HashMap<String, String>,
    projects: BTreeMap<String, Project>,
    id_collisions: usize,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(settings: &'a ReshapeConfig) -> Self {
        Self {
            settings,
            categories: Vec::new(),
            category_ids: HashMap::new(),
            projects: BTreeMap::new(),
            id_collisions: 0,
        }
    }

    /// Add one row, stamped with `now_millis`; returns the project id
    ///
    /// A project whose id was already produced replaces the earlier one.
    pub fn add_row(&mut self, row: &SourceRow, now_millis: i64) -> String {
        let category_id = self.category_for(row.funcion.trim());
        let id = project_id(&self.settings.project_id_prefix, &row.name, now_millis);

        let project = Project {
            avance: calculate_progress(&row.devengado_acumulado, &row.costo_actualizado),
            category_id,
            cui: row.cui.trim().to_string(),
            created_at: now_millis,
            description: self.settings.default_description.clone(),
            id: id.clone(),
            name: row.name.clone(),
            pic_url: self.settings.default_pic_url.clone(),
            presupuesto: budget(&row.monto_viable),
            ubicacion: extract_location(&row.name, &self.settings.default_region),
        };

        if self.projects.insert(id.clone(), project).is_some() {
            self.id_collisions += 1;
            log::warn!("Project id {} generated twice; keeping the later row ({})", id, row.name);
        }

        id
    }

    /// Id of the category titled `title`, registering it on first sight
    fn category_for(&mut self, title: &str) -> String {
        if let Some(id) = self.category_ids.get(title) {
            return id.clone();
        }

        let id = category_id(title);
        log::debug!("New category '{}' -> {}", title, id);
        self.categories.push(Category {
            id: id.clone(),
            pic_url: self.settings.default_category_pic_url.clone(),
            title: title.to_string(),
        });
        self.category_ids.insert(title.to_string(), id.clone());
        id
    }

    pub fn id_collisions(&self) -> usize {
        self.id_collisions
    }

    pub fn finish(self) -> InvestmentDocument {
        InvestmentDocument {
            categories: self.categories,
            projects: self.projects,
        }
    }
}

fn budget(raw: &str) -> f64 {
    if raw.trim().is_empty() {
        return 0.0;
    }
    parse_number(raw).unwrap_or_else(|| {
        log::warn!("Unparseable MONTO VIABLE '{}', using 0", raw);
        0.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, funcion: &str, monto: &str) -> SourceRow {
        SourceRow {
            name: name.to_string(),
            funcion: funcion.to_string(),
            cui: " 2001 ".to_string(),
            monto_viable: monto.to_string(),
            devengado_acumulado: "25".to_string(),
            costo_actualizado: "100".to_string(),
        }
    }

    #[test]
    fn test_categories_first_occurrence_wins() {
        let settings = ReshapeConfig::default();
        let mut builder = DocumentBuilder::new(&settings);

        builder.add_row(&row("A", "SALUD", "1"), 1);
        builder.add_row(&row("B", " TRANSPORTE ", "2"), 2);
        builder.add_row(&row("C", "SALUD", "3"), 3);

        let doc = builder.finish();
        let titles: Vec<_> = doc.categories.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["SALUD", "TRANSPORTE"]);
        assert_eq!(doc.categories[0].id, "f1e43e53");
        assert_eq!(doc.categories[1].id, "8a33ffaa");
        assert_eq!(doc.projects.len(), 3);
    }

    #[test]
    fn test_project_fields() {
        let settings = ReshapeConfig::default();
        let mut builder = DocumentBuilder::new(&settings);

        let id = builder.add_row(&row("PISTAS EN EL DISTRITO YURA, AREQUIPA", "TRANSPORTE", "1500.5"), 42);
        let doc = builder.finish();
        let project = &doc.projects[&id];

        assert!(id.starts_with("proj_"));
        assert_eq!(project.id, id);
        assert_eq!(project.avance, 25.0);
        assert_eq!(project.category_id, "8a33ffaa");
        assert_eq!(project.cui, "2001");
        assert_eq!(project.created_at, 42);
        assert_eq!(project.description, "Descripción no disponible");
        assert_eq!(project.pic_url, settings.default_pic_url);
        assert_eq!(project.presupuesto, 1500.5);
        assert_eq!(project.ubicacion, "YURA");
    }

    #[test]
    fn test_missing_or_bad_budget_is_zero() {
        let settings = ReshapeConfig::default();
        let mut builder = DocumentBuilder::new(&settings);

        let empty = builder.add_row(&row("A", "SALUD", ""), 1);
        let bad = builder.add_row(&row("B", "SALUD", "S/ 100"), 1);

        let doc = builder.finish();
        assert_eq!(doc.projects[&empty].presupuesto, 0.0);
        assert_eq!(doc.projects[&bad].presupuesto, 0.0);
    }

    #[test]
    fn test_same_name_same_millisecond_collides() {
        let settings = ReshapeConfig::default();
        let mut builder = DocumentBuilder::new(&settings);

        let first = builder.add_row(&row("DUP", "SALUD", "1"), 7);
        let second = builder.add_row(&row("DUP", "SALUD", "2"), 7);

        assert_eq!(first, second);
        assert_eq!(builder.id_collisions(), 1);
        let doc = builder.finish();
        assert_eq!(doc.projects.len(), 1);
        assert_eq!(doc.projects[&first].presupuesto, 2.0);
    }
}
