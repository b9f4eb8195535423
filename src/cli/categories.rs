//
//  abuseipdb-client
//  cli/categories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Lists the report categories accepted by `report --category`.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::api::ReportCategory;
use crate::output::{OutputWriter, TableBuilder, TableOutput};

use super::GlobalOptions;

/// List report categories
#[derive(Args, Debug)]
pub struct CategoriesCommand {}

#[derive(Debug, Serialize)]
struct CategoryItem {
    code: u8,
    name: &'static str,
    description: &'static str,
}

impl From<ReportCategory> for CategoryItem {
    fn from(category: ReportCategory) -> Self {
        Self {
            code: category.wire_code(),
            name: category.name(),
            description: category.description(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
struct CategoryList(Vec<CategoryItem>);

impl TableOutput for CategoryList {
    fn print_table(&self, color: bool) {
        TableBuilder::new()
            .color(color)
            .headers(["Code", "Name", "Description"])
            .rows(self.0.iter().map(|item| {
                [
                    item.code.to_string(),
                    item.name.to_string(),
                    item.description.to_string(),
                ]
            }))
            .print();
    }
}

impl CategoriesCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let list = CategoryList(ReportCategory::ALL.into_iter().map(CategoryItem::from).collect());
        OutputWriter::from_json_flag(global.json).write(&list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_list_serializes_as_array() {
        let list = CategoryList(vec![ReportCategory::Ssh.into()]);
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json[0]["code"], 22);
        assert_eq!(json[0]["name"], "ssh");
    }
}
