// Team entity: branding, budget, and season-stats snapshot.

use serde::{Deserialize, Serialize};

pub type TeamId = u64;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub career_id: Option<super::career::CareerId>,
    pub name: String,
    pub short_name: String,
    pub city: String,
    pub home_ground: String,
    pub primary_color: String,
    pub secondary_color: String,

    pub budget: i64,
    pub remaining_budget: i64,

    pub matches_played: i32,
    pub wins: i32,
    pub losses: i32,
    pub no_results: i32,
    pub points: i32,
    pub net_run_rate: f64,

    pub is_user_team: bool,
}

/// A fixed franchise template used to materialise the eight teams for a
/// new career. Budget is the same for every franchise (90 crore paise).
pub struct FranchiseTemplate {
    pub name: &'static str,
    pub short_name: &'static str,
    pub city: &'static str,
    pub home_ground: &'static str,
    pub primary_color: &'static str,
    pub secondary_color: &'static str,
}

pub const DEFAULT_TEAM_BUDGET: i64 = 900_000_000;

pub const FRANCHISE_TEMPLATES: [FranchiseTemplate; 8] = [
    FranchiseTemplate {
        name: "Mumbai Titans",
        short_name: "MT",
        city: "Mumbai",
        home_ground: "Wankhede Stadium",
        primary_color: "#004BA0",
        secondary_color: "#FFD700",
    },
    FranchiseTemplate {
        name: "Chennai Kings",
        short_name: "CK",
        city: "Chennai",
        home_ground: "M.A. Chidambaram Stadium",
        primary_color: "#FFFF00",
        secondary_color: "#0000FF",
    },
    FranchiseTemplate {
        name: "Bangalore Warriors",
        short_name: "BW",
        city: "Bangalore",
        home_ground: "M. Chinnaswamy Stadium",
        primary_color: "#EC1C24",
        secondary_color: "#000000",
    },
    FranchiseTemplate {
        name: "Kolkata Knights",
        short_name: "KK",
        city: "Kolkata",
        home_ground: "Eden Gardens",
        primary_color: "#3A225D",
        secondary_color: "#FFD700",
    },
    FranchiseTemplate {
        name: "Delhi Capitals",
        short_name: "DC",
        city: "Delhi",
        home_ground: "Arun Jaitley Stadium",
        primary_color: "#0078BC",
        secondary_color: "#EF1B23",
    },
    FranchiseTemplate {
        name: "Hyderabad Sunrisers",
        short_name: "HS",
        city: "Hyderabad",
        home_ground: "Rajiv Gandhi Intl. Stadium",
        primary_color: "#FF822A",
        secondary_color: "#000000",
    },
    FranchiseTemplate {
        name: "Rajasthan Royals",
        short_name: "RR",
        city: "Jaipur",
        home_ground: "Sawai Mansingh Stadium",
        primary_color: "#EA1A85",
        secondary_color: "#254AA5",
    },
    FranchiseTemplate {
        name: "Punjab Lions",
        short_name: "PL",
        city: "Mohali",
        home_ground: "PCA Stadium",
        primary_color: "#ED1B24",
        secondary_color: "#A7A9AC",
    },
];
