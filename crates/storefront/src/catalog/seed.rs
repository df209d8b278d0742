//! Built-in product catalog.

use medmart_core::{Product, ProductId};
use rust_decimal::Decimal;

struct Seed {
    id: i32,
    name: &'static str,
    category: &'static str,
    manufacturer: &'static str,
    price: i64,
    original_price: Option<i64>,
    description: &'static str,
    image: &'static str,
    requires_prescription: bool,
    stock: u32,
    ingredients: &'static [&'static str],
    dosage: &'static str,
    side_effects: &'static [&'static str],
    warnings: &'static [&'static str],
}

impl Seed {
    fn into_product(self) -> Product {
        Product {
            id: ProductId::new(self.id),
            name: self.name.to_string(),
            category: self.category.to_string(),
            manufacturer: self.manufacturer.to_string(),
            price: Decimal::from(self.price),
            original_price: self.original_price.map(Decimal::from),
            description: self.description.to_string(),
            image: self.image.to_string(),
            requires_prescription: self.requires_prescription,
            stock: self.stock,
            ingredients: strings(self.ingredients),
            dosage: self.dosage.to_string(),
            side_effects: strings(self.side_effects),
            warnings: strings(self.warnings),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

const IMAGE_BASE: &str = "https://images.pexels.com/photos";

/// The twelve products the store ships with.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn products() -> Vec<Product> {
    let seeds = [
        Seed {
            id: 1,
            name: "Paracetamol 500mg",
            category: "Pain Relief",
            manufacturer: "PharmaCorp",
            price: 25,
            original_price: Some(30),
            description: "Effective pain reliever and fever reducer. Suitable for headaches, body aches, and fever.",
            image: "3683074/pexels-photo-3683074.jpeg",
            requires_prescription: false,
            stock: 150,
            ingredients: &["Paracetamol 500mg"],
            dosage: "1-2 tablets every 4-6 hours as needed",
            side_effects: &["Nausea", "Stomach upset (rare)"],
            warnings: &[
                "Do not exceed 8 tablets in 24 hours",
                "Avoid alcohol while taking this medication",
            ],
        },
        Seed {
            id: 2,
            name: "Amoxicillin 500mg",
            category: "Antibiotics",
            manufacturer: "MediPharm",
            price: 120,
            original_price: None,
            description: "Broad-spectrum antibiotic for treating various bacterial infections.",
            image: "3683081/pexels-photo-3683081.jpeg",
            requires_prescription: true,
            stock: 75,
            ingredients: &["Amoxicillin 500mg"],
            dosage: "1 capsule every 8 hours for 7-10 days",
            side_effects: &["Nausea", "Diarrhea", "Allergic reactions"],
            warnings: &["Complete the full course", "Inform doctor about allergies"],
        },
        Seed {
            id: 3,
            name: "Vitamin D3 1000 IU",
            category: "Vitamins",
            manufacturer: "HealthPlus",
            price: 180,
            original_price: Some(200),
            description: "Essential vitamin for bone health and immune system support.",
            image: "3683089/pexels-photo-3683089.jpeg",
            requires_prescription: false,
            stock: 200,
            ingredients: &["Cholecalciferol (Vitamin D3) 1000 IU"],
            dosage: "1 tablet daily with food",
            side_effects: &["Rare: Hypercalcemia with excessive doses"],
            warnings: &["Store in cool, dry place", "Consult doctor if pregnant"],
        },
        Seed {
            id: 4,
            name: "Omeprazole 20mg",
            category: "Digestive Health",
            manufacturer: "GastroMed",
            price: 85,
            original_price: None,
            description: "Proton pump inhibitor for treating acid reflux and stomach ulcers.",
            image: "3683097/pexels-photo-3683097.jpeg",
            requires_prescription: true,
            stock: 100,
            ingredients: &["Omeprazole 20mg"],
            dosage: "1 capsule daily before breakfast",
            side_effects: &["Headache", "Nausea", "Diarrhea"],
            warnings: &[
                "Do not crush or chew capsules",
                "May interact with other medications",
            ],
        },
        Seed {
            id: 5,
            name: "Cetirizine 10mg",
            category: "Allergy Relief",
            manufacturer: "AllerCare",
            price: 45,
            original_price: None,
            description: "Antihistamine for treating allergies, hay fever, and hives.",
            image: "3683105/pexels-photo-3683105.jpeg",
            requires_prescription: false,
            stock: 120,
            ingredients: &["Cetirizine Hydrochloride 10mg"],
            dosage: "1 tablet once daily",
            side_effects: &["Drowsiness", "Dry mouth", "Headache"],
            warnings: &["May cause drowsiness", "Avoid alcohol"],
        },
        Seed {
            id: 6,
            name: "Ibuprofen 400mg",
            category: "Pain Relief",
            manufacturer: "PainAway",
            price: 35,
            original_price: Some(40),
            description: "Anti-inflammatory pain reliever for muscle pain and inflammation.",
            image: "3683113/pexels-photo-3683113.jpeg",
            requires_prescription: false,
            stock: 90,
            ingredients: &["Ibuprofen 400mg"],
            dosage: "1 tablet every 6-8 hours as needed",
            side_effects: &["Stomach upset", "Dizziness", "Headache"],
            warnings: &["Take with food", "Avoid if allergic to NSAIDs"],
        },
        Seed {
            id: 7,
            name: "Metformin 500mg",
            category: "Diabetes",
            manufacturer: "DiabetCare",
            price: 95,
            original_price: None,
            description: "Medication for managing type 2 diabetes and blood sugar levels.",
            image: "3683121/pexels-photo-3683121.jpeg",
            requires_prescription: true,
            stock: 85,
            ingredients: &["Metformin Hydrochloride 500mg"],
            dosage: "1-2 tablets twice daily with meals",
            side_effects: &["Nausea", "Diarrhea", "Metallic taste"],
            warnings: &[
                "Monitor blood sugar regularly",
                "Inform doctor about kidney problems",
            ],
        },
        Seed {
            id: 8,
            name: "Multivitamin Complex",
            category: "Vitamins",
            manufacturer: "VitaHealth",
            price: 250,
            original_price: None,
            description: "Complete daily vitamin and mineral supplement for overall health.",
            image: "3683129/pexels-photo-3683129.jpeg",
            requires_prescription: false,
            stock: 180,
            ingredients: &["Vitamin A, B-Complex, C, D, E, Zinc, Iron, Calcium"],
            dosage: "1 tablet daily with breakfast",
            side_effects: &["Rare: Stomach upset if taken on empty stomach"],
            warnings: &["Store away from children", "Do not exceed recommended dose"],
        },
        Seed {
            id: 9,
            name: "Loratadine 10mg",
            category: "Allergy Relief",
            manufacturer: "AllerFree",
            price: 55,
            original_price: None,
            description: "Non-drowsy antihistamine for seasonal allergies and allergic reactions.",
            image: "3683137/pexels-photo-3683137.jpeg",
            requires_prescription: false,
            stock: 140,
            ingredients: &["Loratadine 10mg"],
            dosage: "1 tablet once daily",
            side_effects: &["Headache", "Dry mouth", "Fatigue"],
            warnings: &["Non-drowsy formula", "Consult doctor if pregnant"],
        },
        Seed {
            id: 10,
            name: "Calcium Carbonate 500mg",
            category: "Supplements",
            manufacturer: "BoneStrong",
            price: 160,
            original_price: None,
            description: "Calcium supplement for bone health and muscle function.",
            image: "3683145/pexels-photo-3683145.jpeg",
            requires_prescription: false,
            stock: 110,
            ingredients: &["Calcium Carbonate 500mg"],
            dosage: "1-2 tablets daily with meals",
            side_effects: &["Constipation", "Bloating"],
            warnings: &[
                "Take with vitamin D for better absorption",
                "Avoid with iron supplements",
            ],
        },
        Seed {
            id: 11,
            name: "Aspirin 75mg",
            category: "Cardiovascular",
            manufacturer: "HeartCare",
            price: 40,
            original_price: None,
            description: "Low-dose aspirin for cardiovascular protection and blood thinning.",
            image: "3683153/pexels-photo-3683153.jpeg",
            requires_prescription: true,
            stock: 95,
            ingredients: &["Acetylsalicylic Acid 75mg"],
            dosage: "1 tablet daily with food",
            side_effects: &["Stomach irritation", "Bleeding risk"],
            warnings: &["Monitor for bleeding", "Avoid if allergic to salicylates"],
        },
        Seed {
            id: 12,
            name: "Zinc Sulfate 50mg",
            category: "Supplements",
            manufacturer: "ImmuneBoost",
            price: 130,
            original_price: None,
            description: "Zinc supplement for immune system support and wound healing.",
            image: "3683161/pexels-photo-3683161.jpeg",
            requires_prescription: false,
            stock: 125,
            ingredients: &["Zinc Sulfate 50mg"],
            dosage: "1 tablet daily with food",
            side_effects: &["Nausea", "Stomach upset", "Metallic taste"],
            warnings: &[
                "Take with food to reduce stomach upset",
                "Do not exceed recommended dose",
            ],
        },
    ];

    seeds
        .into_iter()
        .map(|seed| {
            let image = format!("{IMAGE_BASE}/{}?auto=compress&cs=tinysrgb&w=400", seed.image);
            let mut product = seed.into_product();
            product.image = image;
            product
        })
        .collect()
}
