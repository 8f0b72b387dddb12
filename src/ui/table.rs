use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Default)]
pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

pub fn stats_table(stats: &crate::DatasetStats) -> String {
    let mut builder = TableBuilder::new();
    builder.add_row("Companies", &stats.companies.to_string());
    builder.add_row("Locations", &stats.locations.to_string());
    builder.add_row("Orphan locations", &stats.orphan_locations.to_string());
    builder.add_row("Duplicate company ids", &stats.duplicate_company_ids.to_string());
    builder.build()
}
