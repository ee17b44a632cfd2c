//! Peruvian departments (UBIGEO codes) accepted by the report endpoint

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Department {
    pub code: &'static str,
    pub name: &'static str,
}

pub const DEPARTMENTS: [Department; 25] = [
    Department { code: "01", name: "Amazonas" },
    Department { code: "02", name: "Áncash" },
    Department { code: "03", name: "Apurímac" },
    Department { code: "04", name: "Arequipa" },
    Department { code: "05", name: "Ayacucho" },
    Department { code: "06", name: "Cajamarca" },
    Department { code: "07", name: "Callao" },
    Department { code: "08", name: "Cusco" },
    Department { code: "09", name: "Huancavelica" },
    Department { code: "10", name: "Huánuco" },
    Department { code: "11", name: "Ica" },
    Department { code: "12", name: "Junín" },
    Department { code: "13", name: "La Libertad" },
    Department { code: "14", name: "Lambayeque" },
    Department { code: "15", name: "Lima" },
    Department { code: "16", name: "Loreto" },
    Department { code: "17", name: "Madre de Dios" },
    Department { code: "18", name: "Moquegua" },
    Department { code: "19", name: "Pasco" },
    Department { code: "20", name: "Piura" },
    Department { code: "21", name: "Puno" },
    Department { code: "22", name: "San Martín" },
    Department { code: "23", name: "Tacna" },
    Department { code: "24", name: "Tumbes" },
    Department { code: "25", name: "Ucayali" },
];

impl Department {
    /// Directory and file name fragment: lowercase, spaces as underscores
    pub fn slug(&self) -> String {
        self.name.to_lowercase().replace(' ', "_")
    }
}

/// Find a department by code ("4" and "04" both match Arequipa) or by name
pub fn find(selector: &str) -> Option<&'static Department> {
    let selector = selector.trim();

    if let Ok(number) = selector.parse::<u8>() {
        return DEPARTMENTS
            .iter()
            .find(|d| d.code.parse::<u8>().ok() == Some(number));
    }

    let wanted = selector.to_lowercase();
    DEPARTMENTS
        .iter()
        .find(|d| d.name.to_lowercase() == wanted || d.slug() == wanted)
}
