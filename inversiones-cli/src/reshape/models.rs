//! Source rows and output document types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One row of the normalized MEF CSV; only the columns used are read
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceRow {
    #[serde(rename = "NOMBRE DE LA INVERSION")]
    pub name: String,
    #[serde(rename = "FUNCION")]
    pub funcion: String,
    #[serde(rename = "CUI", default)]
    pub cui: String,
    #[serde(rename = "MONTO VIABLE", default)]
    pub monto_viable: String,
    #[serde(rename = "DEVENGADO ACUMULADO", default)]
    pub devengado_acumulado: String,
    #[serde(rename = "COSTO ACTUALIZADO", default)]
    pub costo_actualizado: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Content hash of the title
    pub id: String,
    pub pic_url: String,
    pub title: String,
}

/// An investment project as stored under `Projects/<id>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Progress percentage
    pub avance: f64,
    pub category_id: String,
    pub cui: String,
    /// Epoch milliseconds
    pub created_at: i64,
    pub description: String,
    pub id: String,
    pub name: String,
    pub pic_url: String,
    /// Viable amount (budget)
    pub presupuesto: f64,
    /// Best-effort location guess
    pub ubicacion: String,
}

/// The JSON document written by the reshaper and read by the publisher
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvestmentDocument {
    #[serde(rename = "Category")]
    pub categories: Vec<Category>,
    #[serde(rename = "Projects")]
    pub projects: BTreeMap<String, Project>,
}
