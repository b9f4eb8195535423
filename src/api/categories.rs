//
//  abuseipdb-client
//  api/categories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Report Categories
//!
//! AbuseIPDB classifies every report with one or more numeric categories.
//! Locally each category occupies one bit of a `u64`, so several of them can
//! be combined into a single [`CategorySet`] and carried around by value.
//!
//! The bit position is NOT the number the API expects: bit `i` maps to wire
//! code `i + 1`.
//!
//! ```rust
//! use abuseipdb_client::api::{CategorySet, ReportCategory};
//!
//! let set = ReportCategory::BruteForce | ReportCategory::Ssh;
//! assert_eq!(set.wire_codes(), vec![18, 22]);
//! assert_eq!(set.to_param(), "18,22");
//! ```

use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

use thiserror::Error;

/// Number of categories defined by the upstream service.
pub const CATEGORY_COUNT: u32 = 23;

/// A single abuse category.
///
/// Variants are declared in bit order; the discriminant is the bit position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ReportCategory {
    DnsCompromise = 0,
    DnsPoisoning,
    FraudOrders,
    DdosAttack,
    FtpBruteForce,
    PingOfDeath,
    Phishing,
    FraudVoip,
    OpenProxy,
    WebSpam,
    EmailSpam,
    BlogSpam,
    VpnIp,
    PortScan,
    Hacking,
    SqlInjection,
    Spoofing,
    BruteForce,
    BadWebBot,
    ExploitedHost,
    WebAppAttack,
    Ssh,
    IotTargeted,
}

impl ReportCategory {
    /// Every category, in ascending bit order.
    pub const ALL: [ReportCategory; CATEGORY_COUNT as usize] = [
        Self::DnsCompromise,
        Self::DnsPoisoning,
        Self::FraudOrders,
        Self::DdosAttack,
        Self::FtpBruteForce,
        Self::PingOfDeath,
        Self::Phishing,
        Self::FraudVoip,
        Self::OpenProxy,
        Self::WebSpam,
        Self::EmailSpam,
        Self::BlogSpam,
        Self::VpnIp,
        Self::PortScan,
        Self::Hacking,
        Self::SqlInjection,
        Self::Spoofing,
        Self::BruteForce,
        Self::BadWebBot,
        Self::ExploitedHost,
        Self::WebAppAttack,
        Self::Ssh,
        Self::IotTargeted,
    ];

    /// Bit position of this category inside a [`CategorySet`].
    pub const fn position(self) -> u32 {
        self as u32
    }

    /// The flag value (`1 << position`).
    pub const fn bit(self) -> u64 {
        1u64 << self.position()
    }

    /// The category number sent to the API.
    pub const fn wire_code(self) -> u8 {
        self as u8 + 1
    }

    /// Looks up a category by its API number (1-23).
    pub fn from_wire_code(code: u8) -> Option<Self> {
        code.checked_sub(1)
            .and_then(|position| Self::ALL.get(position as usize))
            .copied()
    }

    /// Command-line name of the category, e.g. `brute-force`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::DnsCompromise => "dns-compromise",
            Self::DnsPoisoning => "dns-poisoning",
            Self::FraudOrders => "fraud-orders",
            Self::DdosAttack => "ddos-attack",
            Self::FtpBruteForce => "ftp-brute-force",
            Self::PingOfDeath => "ping-of-death",
            Self::Phishing => "phishing",
            Self::FraudVoip => "fraud-voip",
            Self::OpenProxy => "open-proxy",
            Self::WebSpam => "web-spam",
            Self::EmailSpam => "email-spam",
            Self::BlogSpam => "blog-spam",
            Self::VpnIp => "vpn-ip",
            Self::PortScan => "port-scan",
            Self::Hacking => "hacking",
            Self::SqlInjection => "sql-injection",
            Self::Spoofing => "spoofing",
            Self::BruteForce => "brute-force",
            Self::BadWebBot => "bad-web-bot",
            Self::ExploitedHost => "exploited-host",
            Self::WebAppAttack => "web-app-attack",
            Self::Ssh => "ssh",
            Self::IotTargeted => "iot-targeted",
        }
    }

    /// Short human-readable description, as listed by `abuseipdb categories`.
    pub const fn description(self) -> &'static str {
        match self {
            Self::DnsCompromise => "Altering DNS records resulting in improper redirection",
            Self::DnsPoisoning => "Falsifying domain server cache (cache poisoning)",
            Self::FraudOrders => "Fraudulent orders",
            Self::DdosAttack => "Participating in distributed denial-of-service",
            Self::FtpBruteForce => "FTP brute-force",
            Self::PingOfDeath => "Oversized IP packet",
            Self::Phishing => "Phishing websites and/or email",
            Self::FraudVoip => "Fraudulent VoIP",
            Self::OpenProxy => "Open proxy, open relay, or Tor exit node",
            Self::WebSpam => "Comment/forum spam, HTTP referer spam, or other CMS spam",
            Self::EmailSpam => "Spam email content, infected attachments, and phishing emails",
            Self::BlogSpam => "CMS blog comment spam",
            Self::VpnIp => "Conjunctive category",
            Self::PortScan => "Scanning for open ports and vulnerable services",
            Self::Hacking => "Hacking",
            Self::SqlInjection => "Attempts at SQL injection",
            Self::Spoofing => "Email sender spoofing",
            Self::BruteForce => "Credential brute-force attacks on webpage logins and services",
            Self::BadWebBot => "Webpage scraping and crawlers that do not honor robots.txt",
            Self::ExploitedHost => "Host is likely infected with malware",
            Self::WebAppAttack => "Attempts to probe for or exploit installed web applications",
            Self::Ssh => "Secure Shell (SSH) abuse",
            Self::IotTargeted => "Abuse targeted at an Internet of Things type device",
        }
    }
}

impl fmt::Display for ReportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no known category.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown report category '{0}' (run `abuseipdb categories` for the list)")]
pub struct ParseCategoryError(pub String);

impl FromStr for ReportCategory {
    type Err = ParseCategoryError;

    /// Accepts the command-line name (`brute-force`, `BRUTE_FORCE`) or the
    /// numeric wire code (`18`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Ok(code) = trimmed.parse::<u8>() {
            return Self::from_wire_code(code).ok_or_else(|| ParseCategoryError(s.to_string()));
        }

        let normalized = trimmed.to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.name() == normalized)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// A union of [`ReportCategory`] flags stored as a single `u64`.
///
/// Only the low 23 bits carry meaning. Higher bits survive in [`bits`](Self::bits)
/// but are ignored by [`iter`](Self::iter) and [`wire_codes`](Self::wire_codes).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CategorySet(u64);

impl CategorySet {
    /// The set with no categories. Not a valid input for a report.
    pub const EMPTY: CategorySet = CategorySet(0);

    /// Wraps raw flag bits without validation.
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Bitwise OR of two sets.
    pub const fn union(self, other: CategorySet) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns a copy of this set with `category` added.
    pub const fn with(self, category: ReportCategory) -> Self {
        Self(self.0 | category.bit())
    }

    pub const fn contains(self, category: ReportCategory) -> bool {
        self.0 & category.bit() != 0
    }

    /// Iterates the categories present, lowest bit first.
    pub fn iter(self) -> impl Iterator<Item = ReportCategory> {
        ReportCategory::ALL
            .into_iter()
            .filter(move |category| self.contains(*category))
    }

    /// Decomposes the set into the ascending list of API category numbers.
    pub fn wire_codes(self) -> Vec<u8> {
        self.iter().map(ReportCategory::wire_code).collect()
    }

    /// Comma-joined wire codes, the value of the `categories` parameter.
    pub fn to_param(self) -> String {
        self.wire_codes()
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl From<ReportCategory> for CategorySet {
    fn from(category: ReportCategory) -> Self {
        Self(category.bit())
    }
}

impl FromIterator<ReportCategory> for CategorySet {
    fn from_iter<I: IntoIterator<Item = ReportCategory>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, CategorySet::with)
    }
}

impl BitOr for CategorySet {
    type Output = CategorySet;

    fn bitor(self, rhs: CategorySet) -> CategorySet {
        self.union(rhs)
    }
}

impl BitOr<ReportCategory> for CategorySet {
    type Output = CategorySet;

    fn bitor(self, rhs: ReportCategory) -> CategorySet {
        self.with(rhs)
    }
}

impl BitOr for ReportCategory {
    type Output = CategorySet;

    fn bitor(self, rhs: ReportCategory) -> CategorySet {
        CategorySet::from(self).with(rhs)
    }
}

impl fmt::Display for CategorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(ReportCategory::name).collect();
        f.write_str(&names.join(","))
    }
}
