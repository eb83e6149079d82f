use crate::timeline::GroupDescriptor;

/// A strategic area of the plan. Areas are the roadmap's swimlanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub color_hex: &'static str,
}

impl AreaDescriptor {
    pub fn to_group(&self) -> GroupDescriptor {
        GroupDescriptor {
            group_key: self.key.to_string(),
            display_label: self.label.to_string(),
            color_hex: self.color_hex.to_string(),
        }
    }
}

pub const AREAS: &[AreaDescriptor] = &[
    AreaDescriptor { key: "ecommerce", label: "E-commerce", color_hex: "#2563EB" },
    AreaDescriptor { key: "distribution", label: "Distribution & Marketplaces", color_hex: "#D97706" },
    AreaDescriptor { key: "ux", label: "User Experience (UX)", color_hex: "#9333EA" },
    AreaDescriptor { key: "loyalty", label: "Loyalty & Membership", color_hex: "#DB2777" },
    AreaDescriptor { key: "crm", label: "CRM & Data", color_hex: "#0891B2" },
    AreaDescriptor { key: "social", label: "Social Media & Content", color_hex: "#DC2626" },
    AreaDescriptor { key: "seo", label: "SEO & SEM", color_hex: "#16A34A" },
    AreaDescriptor { key: "tech", label: "Tech & Infrastructure", color_hex: "#475569" },
    AreaDescriptor { key: "organization", label: "Organisation & Culture", color_hex: "#4F46E5" },
    AreaDescriptor { key: "logistics", label: "Logistics", color_hex: "#0D9488" },
];

pub fn find_area(key: &str) -> Option<&'static AreaDescriptor> {
    AREAS.iter().find(|a| a.key == key)
}

/// Swimlane descriptors for every area, in display order.
pub fn group_descriptors() -> Vec<GroupDescriptor> {
    AREAS.iter().map(AreaDescriptor::to_group).collect()
}
