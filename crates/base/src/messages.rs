pub const CURRENCY_RATE_MISSING: &str = "No currency rate found from {} to {} on {}";
pub const JSON_FIELD_CANNOT_BE_ANONYMIZED: &str = "JSON fields cannot be anonymized";
pub const SEQUENCE_MISSING: &str = "No sequence configured for {}";
pub const DATE_OUT_OF_RANGE: &str = "Date out of range";

pub const FR: &[(&str, &str)] = &[
    (
        CURRENCY_RATE_MISSING,
        "Aucun taux de change trouvé de {} vers {} au {}",
    ),
    (
        JSON_FIELD_CANNOT_BE_ANONYMIZED,
        "Les champs JSON ne peuvent pas être anonymisés",
    ),
    (SEQUENCE_MISSING, "Aucune séquence configurée pour {}"),
    (DATE_OUT_OF_RANGE, "Date hors limites"),
];
