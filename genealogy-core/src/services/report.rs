use serde::Serialize;

use crate::model::person::BilingualPersonRecord;

#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub total_nodes: usize,
    /// Nodes with both an English and a Telugu name.
    pub matched: usize,
    pub english_only: usize,
    pub telugu_only: usize,
    /// Nodes where both names are empty (blank source records).
    pub nameless: usize,
    /// Root is depth 1.
    pub max_depth: usize,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct RootSample {
    pub name: String,
    pub name_en: String,
    pub name_te: String,
    pub children: usize,
    pub hidden_children: usize,
}

#[derive(Debug, Serialize, Clone)]
pub struct MergeReport {
    pub output_path: String,
    pub size_bytes: usize,
    pub sha256: String,
    pub dictionary_fingerprint: String,
    pub stats: MergeStats,
    pub root: RootSample,
    pub issues: usize,
}

impl MergeReport {
    pub fn size_kb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0
    }

    /// Human-readable summary printed after a merge.
    pub fn status_lines(&self) -> Vec<String> {
        let s = &self.stats;
        vec![
            format!("Created {}", self.output_path),
            format!("File size: {:.1} KB", self.size_kb()),
            format!("SHA-256: {}", self.sha256),
            format!(
                "Nodes: {} total, {} matched, {} English-only, {} Telugu-only, depth {}",
                s.total_nodes, s.matched, s.english_only, s.telugu_only, s.max_depth
            ),
            "Root sample:".to_string(),
            format!("  name:      {}", self.root.name),
            format!("  nameEn:    {}", self.root.name_en),
            format!("  nameTe:    {}", self.root.name_te),
            format!("  children:  {}", self.root.children),
            format!("  _children: {}", self.root.hidden_children),
        ]
    }
}

pub fn collect(root: &BilingualPersonRecord) -> MergeStats {
    let mut stats = MergeStats::default();
    let mut stack: Vec<(&BilingualPersonRecord, usize)> = vec![(root, 1)];

    while let Some((node, depth)) = stack.pop() {
        stats.total_nodes += 1;
        stats.max_depth = stats.max_depth.max(depth);

        match (node.name_en.is_empty(), node.name_te.is_empty()) {
            (false, false) => stats.matched += 1,
            (false, true) => stats.english_only += 1,
            (true, false) => stats.telugu_only += 1,
            (true, true) => stats.nameless += 1,
        }

        for branch in [&node.children, &node.hidden_children].into_iter().flatten() {
            stack.extend(branch.iter().map(|child| (child, depth + 1)));
        }
    }

    stats
}

pub fn sample(root: &BilingualPersonRecord) -> RootSample {
    RootSample {
        name: root.name.clone(),
        name_en: root.name_en.clone(),
        name_te: root.name_te.clone(),
        children: root.children.as_ref().map_or(0, Vec::len),
        hidden_children: root.hidden_children.as_ref().map_or(0, Vec::len),
    }
}
