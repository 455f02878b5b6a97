//! Block model and the audience-aware document builder.
//!
//! One builder serves both report variants; the variants differ only in
//! which sections and identity fields they include, so the policy lives in
//! `Section::included` instead of two parallel renderers.

use clap::ValueEnum;

use crate::order::OrderSnapshot;

/// Bounding box for suboption and color thumbnails, in mm.
pub const THUMB_MAX_W_MM: f32 = 60.0;
pub const THUMB_MAX_H_MM: f32 = 45.0;

/// Bounding box for design and floor-plan images, in mm.
pub const DESIGN_MAX_W_MM: f32 = 180.0;
pub const DESIGN_MAX_H_MM: f32 = 140.0;

/// Signature images are placed at literal size, never fitted.
pub const SIGNATURE_W_MM: f32 = 60.0;
pub const SIGNATURE_H_MM: f32 = 25.0;

/// Report audience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    Admin,
    Seller,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    Title,
    Section,
}

/// One self-contained layout unit.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading {
        text: String,
        level: HeadingLevel,
    },
    KeyValueTable {
        rows: Vec<(String, String)>,
    },
    GroupedTable {
        group_label: String,
        column_headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Image {
        source_url: String,
        max_width: f32,
        max_height: f32,
        caption_before: Option<String>,
    },
    Paragraph {
        text: String,
    },
    Signature {
        source_url: String,
        fixed_width: f32,
        fixed_height: f32,
    },
}

/// Ordered block sequence for one render pass. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
}

/// Report sections, in their contractual order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Info,
    Colors,
    Options,
    Designs,
    Comments,
    Signature,
}

const SECTION_ORDER: [Section; 6] = [
    Section::Info,
    Section::Colors,
    Section::Options,
    Section::Designs,
    Section::Comments,
    Section::Signature,
];

impl Section {
    fn included(self, order: &OrderSnapshot, variant: Variant) -> bool {
        match self {
            Section::Info => true,
            Section::Colors => variant == Variant::Admin && !order.colors.is_empty(),
            Section::Options => !order.options.is_empty(),
            Section::Designs => !order.designs.is_empty() || !order.floor_plans.is_empty(),
            Section::Comments => !order.comments.trim().is_empty(),
            Section::Signature => order.signature_url.is_some(),
        }
    }
}

pub struct DocumentBuilder<'a> {
    order: &'a OrderSnapshot,
    variant: Variant,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(order: &'a OrderSnapshot, variant: Variant) -> Self {
        Self { order, variant }
    }

    /// Assemble the block sequence. Never fails: a missing product name
    /// falls back to a literal "NA" title.
    pub fn build(&self) -> Document {
        let mut blocks = vec![Block::Heading {
            text: self.product_title(),
            level: HeadingLevel::Title,
        }];

        for section in SECTION_ORDER {
            if !section.included(self.order, self.variant) {
                continue;
            }
            match section {
                Section::Info => self.emit_info(&mut blocks),
                Section::Colors => self.emit_colors(&mut blocks),
                Section::Options => self.emit_options(&mut blocks),
                Section::Designs => self.emit_designs(&mut blocks),
                Section::Comments => self.emit_comments(&mut blocks),
                Section::Signature => self.emit_signature(&mut blocks),
            }
        }

        Document { blocks }
    }

    fn product_title(&self) -> String {
        self.order
            .product_name
            .clone()
            .unwrap_or_else(|| "NA".to_string())
    }

    fn emit_info(&self, blocks: &mut Vec<Block>) {
        let order = self.order;
        // The two variants intentionally differ in which identity fields
        // appear; totals are common to both.
        let mut rows: Vec<(String, String)> = match self.variant {
            Variant::Admin => vec![
                ("Status".into(), order.status.clone()),
                ("Vendor".into(), order.seller_name.clone()),
                ("Vendor email".into(), order.seller_email.clone()),
            ],
            Variant::Seller => vec![
                ("Product".into(), self.product_title()),
                ("Client".into(), order.client_name.clone()),
                ("Vendor".into(), order.seller_name.clone()),
                ("Date".into(), order.created_at.format("%Y-%m-%d").to_string()),
            ],
        };
        rows.push(("Total".into(), format!("{:.2}", order.total)));
        if order.discount > 0.0 {
            rows.push(("Discount".into(), format!("{:.2}", order.discount)));
        }
        rows.push(("Tax".into(), format!("{:.2}", order.tax)));

        blocks.push(Block::KeyValueTable { rows });
    }

    fn emit_colors(&self, blocks: &mut Vec<Block>) {
        blocks.push(Block::GroupedTable {
            group_label: "Colors".into(),
            column_headers: vec!["Name".into(), "Code".into()],
            rows: self
                .order
                .colors
                .iter()
                .map(|c| vec![c.name.clone(), c.code.clone()])
                .collect(),
        });
        for color in &self.order.colors {
            if let Some(url) = &color.image_url {
                blocks.push(Block::Image {
                    source_url: url.clone(),
                    max_width: THUMB_MAX_W_MM,
                    max_height: THUMB_MAX_H_MM,
                    caption_before: Some(color.name.clone()),
                });
            }
        }
    }

    fn emit_options(&self, blocks: &mut Vec<Block>) {
        for option in &self.order.options {
            blocks.push(Block::GroupedTable {
                group_label: option.name.clone(),
                column_headers: vec![
                    "Name".into(),
                    "Code".into(),
                    "Details".into(),
                    "Comment".into(),
                ],
                rows: option
                    .suboptions
                    .iter()
                    .map(|s| {
                        vec![
                            s.name.clone(),
                            s.code.clone(),
                            s.details.clone(),
                            s.comment.clone(),
                        ]
                    })
                    .collect(),
            });
            // Suboptions without an image contribute no block at all.
            for sub in &option.suboptions {
                if let Some(url) = &sub.image_url {
                    blocks.push(Block::Image {
                        source_url: url.clone(),
                        max_width: THUMB_MAX_W_MM,
                        max_height: THUMB_MAX_H_MM,
                        caption_before: Some(sub.name.clone()),
                    });
                }
            }
        }
    }

    fn emit_designs(&self, blocks: &mut Vec<Block>) {
        if !self.order.designs.is_empty() {
            blocks.push(Block::GroupedTable {
                group_label: "Designs".into(),
                column_headers: vec!["Type".into(), "Name".into()],
                rows: self
                    .order
                    .designs
                    .iter()
                    .map(|d| vec![d.design_type.clone(), d.name.clone()])
                    .collect(),
            });
        }
        for design in &self.order.designs {
            blocks.push(Block::Image {
                source_url: design.image_url.clone(),
                max_width: DESIGN_MAX_W_MM,
                max_height: DESIGN_MAX_H_MM,
                caption_before: Some(design.name.clone()),
            });
        }
        for plan in &self.order.floor_plans {
            blocks.push(Block::Image {
                source_url: plan.image_url.clone(),
                max_width: DESIGN_MAX_W_MM,
                max_height: DESIGN_MAX_H_MM,
                caption_before: Some(plan.name.clone()),
            });
        }
    }

    fn emit_comments(&self, blocks: &mut Vec<Block>) {
        blocks.push(Block::Heading {
            text: "Comments".into(),
            level: HeadingLevel::Section,
        });
        blocks.push(Block::Paragraph {
            text: self.order.comments.clone(),
        });
    }

    fn emit_signature(&self, blocks: &mut Vec<Block>) {
        if let Some(url) = &self.order.signature_url {
            blocks.push(Block::Signature {
                source_url: url.clone(),
                fixed_width: SIGNATURE_W_MM,
                fixed_height: SIGNATURE_H_MM,
            });
        }
    }
}
