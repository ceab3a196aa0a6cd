use serde::Serialize;

use crate::prediction::PredictionError;

/// Display text for one cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClusterProfile {
    pub label: &'static str,
    pub suggestion: &'static str,
}

/// Indexed by mixture component. The loader rejects models whose component
/// count differs from this table's length.
pub static CLUSTER_PROFILES: [ClusterProfile; 4] = [
    ClusterProfile {
        label: "Willing to Stay",
        suggestion: "No immediate action needed. Continue engagement.",
    },
    ClusterProfile {
        label: "Less Likely to Leave",
        suggestion: "Consider offering a promotion or reskilling opportunities.",
    },
    ClusterProfile {
        label: "Most Likely to Leave",
        suggestion:
            "High risk of attrition. Increase salary, enhance role clarity, or flexible work options.",
    },
    ClusterProfile {
        label: "Satisfied Performer",
        suggestion: "Recognize achievements. Promote leadership programs.",
    },
];

pub fn profile_for(cluster: usize) -> Result<&'static ClusterProfile, PredictionError> {
    CLUSTER_PROFILES
        .get(cluster)
        .ok_or(PredictionError::UnmappedCluster { cluster })
}
