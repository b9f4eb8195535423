//
//  abuseipdb-client
//  output/models.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Terminal renderings of the API response models.

use console::style;

use super::{format_bool, format_optional, format_score, print_field, print_header, truncate};
use super::{TableBuilder, TableOutput};
use crate::api::models::{
    BlacklistResponse, BulkReportData, CheckBlockData, CheckData, ClearAddressData, ReportData,
};
use crate::api::ReportCategory;

const COMMENT_WIDTH: usize = 60;

/// Maps wire codes to category names, keeping unknown codes as numbers.
pub fn category_names(codes: &[u8]) -> String {
    codes
        .iter()
        .map(|&code| {
            ReportCategory::from_wire_code(code)
                .map(|category| category.name().to_string())
                .unwrap_or_else(|| code.to_string())
        })
        .collect::<Vec<_>>()
        .join(", ")
}

impl TableOutput for CheckData {
    fn print_table(&self, color: bool) {
        print_header(&self.ip_address);
        print_field("Abuse confidence", &format_score(self.abuse_confidence_score, color), color);

        let country = match (&self.country_code, &self.country_name) {
            (Some(code), Some(name)) => format!("{name} ({code})"),
            (code, _) => format_optional(code.as_deref()),
        };
        print_field("Country", &country, color);
        print_field("Usage type", &format_optional(self.usage_type.as_deref()), color);
        print_field("ISP", &format_optional(self.isp.as_deref()), color);
        print_field("Domain", &format_optional(self.domain.as_deref()), color);
        if !self.hostnames.is_empty() {
            print_field("Hostnames", &self.hostnames.join(", "), color);
        }
        if let Some(is_tor) = self.is_tor {
            print_field("Tor exit node", &format_bool(is_tor, color), color);
        }
        if let Some(whitelisted) = self.is_whitelisted {
            print_field("Whitelisted", &format_bool(whitelisted, color), color);
        }
        print_field("Total reports", &self.total_reports.to_string(), color);
        print_field("Distinct users", &self.num_distinct_users.to_string(), color);
        print_field("Last reported", &format_optional(self.last_reported_at.as_deref()), color);

        if self.reports.is_empty() {
            return;
        }

        println!();
        TableBuilder::new()
            .color(color)
            .headers(["Reported at", "Categories", "Comment", "Reporter"])
            .rows(self.reports.iter().map(|report| {
                [
                    report.reported_at.clone(),
                    category_names(&report.categories),
                    truncate(report.comment.as_deref().unwrap_or_default(), COMMENT_WIDTH),
                    format_optional(report.reporter_country_code.as_deref()),
                ]
            }))
            .print();
    }
}

impl TableOutput for CheckBlockData {
    fn print_table(&self, color: bool) {
        print_header(&format!("{} / {}", self.network_address, self.netmask));
        if let (Some(min), Some(max)) = (&self.min_address, &self.max_address) {
            print_field("Range", &format!("{min} - {max}"), color);
        }
        print_field("Possible hosts", &self.num_possible_hosts.to_string(), color);
        print_field(
            "Address space",
            &format_optional(self.address_space_desc.as_deref()),
            color,
        );

        if self.reported_address.is_empty() {
            println!();
            println!("No reported addresses in this block.");
            return;
        }

        println!();
        TableBuilder::new()
            .color(color)
            .headers(["IP", "Reports", "Score", "Most recent", "Country"])
            .rows(self.reported_address.iter().map(|entry| {
                [
                    entry.ip_address.clone(),
                    entry.num_reports.to_string(),
                    format_score(entry.abuse_confidence_score, color),
                    format_optional(entry.most_recent_report.as_deref()),
                    format_optional(entry.country_code.as_deref()),
                ]
            }))
            .print();
    }
}

impl TableOutput for ReportData {
    fn print_table(&self, color: bool) {
        let ip = if color {
            style(&self.ip_address).bold().to_string()
        } else {
            self.ip_address.clone()
        };
        println!(
            "Reported {} (abuse confidence now {})",
            ip,
            format_score(self.abuse_confidence_score, color)
        );
    }
}

impl TableOutput for ClearAddressData {
    fn print_table(&self, _color: bool) {
        println!("Deleted {} report(s)", self.num_reports_deleted);
    }
}

impl TableOutput for BulkReportData {
    fn print_table(&self, color: bool) {
        print_field("Saved reports", &self.saved_reports.to_string(), color);
        print_field("Invalid reports", &self.invalid_reports.len().to_string(), color);

        if self.invalid_reports.is_empty() {
            return;
        }

        println!();
        TableBuilder::new()
            .color(color)
            .headers(["Row", "Input", "Error"])
            .rows(self.invalid_reports.iter().map(|invalid| {
                [
                    invalid.row_number.to_string(),
                    truncate(&invalid.input, COMMENT_WIDTH),
                    invalid.error.clone(),
                ]
            }))
            .print();
    }
}

impl TableOutput for BlacklistResponse {
    fn print_table(&self, color: bool) {
        if self.data.is_empty() {
            println!("No blacklisted addresses matched.");
            return;
        }

        TableBuilder::new()
            .color(color)
            .headers(["IP", "Score", "Country", "Last reported"])
            .rows(self.data.iter().map(|entry| {
                [
                    entry.ip_address.clone(),
                    format_score(entry.abuse_confidence_score, color),
                    format_optional(entry.country_code.as_deref()),
                    format_optional(entry.last_reported_at.as_deref()),
                ]
            }))
            .print();

        println!();
        let generated = self
            .meta
            .as_ref()
            .and_then(|meta| meta.generated_at.as_deref());
        match generated {
            Some(at) => println!("Showing {} address(es), generated at {}", self.data.len(), at),
            None => println!("Showing {} address(es)", self.data.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_names() {
        assert_eq!(category_names(&[18, 22]), "brute-force, ssh");
        assert_eq!(category_names(&[99]), "99");
        assert_eq!(category_names(&[]), "");
    }
}
