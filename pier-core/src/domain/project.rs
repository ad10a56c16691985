//! Project domain types

use serde::{Deserialize, Serialize};

use crate::ordered_map::OrderedMap;

/// A project groups members and the servers pipelines build and deploy on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: String,
    pub owner_user_id: String,
    pub avatar_url: String,
    pub name: String,
    pub created_at: Option<i64>,
    pub members: Vec<Member>,
    pub deploy_servers: Vec<Server>,
    pub build_servers: Vec<Server>,
}

impl Project {
    /// User ids of every member, in membership order
    pub fn member_ids(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.user_id.as_str()).collect()
    }
}

/// Project membership
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub user_id: String,
    pub role: Option<String>,
}

/// Build or deploy host attached to a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    pub name: String,
    pub host: String,
    /// Networks a deployment on this host may attach to
    pub networks: Option<OrderedMap<String, String>>,
    /// Every network known on the host
    pub all_networks: Option<Vec<Network>>,
    /// Name of the network currently selected
    pub selected_network: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub id: String,
    pub name: String,
    pub driver: Option<String>,
}
