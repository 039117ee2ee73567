pub const STOCK_MOVE_NO_DESTINATION: &str = "Please fill in the destination stock location";
pub const STOCK_MOVE_STATUS_UNCHANGEABLE: &str = "The stock move {} can not go from status {} to {}";
pub const STOCK_MOVE_LOCATION_UNCHANGEABLE: &str =
    "The destination of the stock move {} can not be changed once it is {}";
pub const STOCK_MOVE_NO_LINE: &str = "The stock move {} has no line";
pub const UNIT_CONVERSION_MISSING: &str = "Please configure unit conversion from '{}' to '{}'";
pub const STOCK_MOVE_LINE_UPDATED: &str = "Line successfully updated.";
pub const QTY_NEGATIVE: &str = "The quantity can not be negative";

pub const FR: &[(&str, &str)] = &[
    (
        STOCK_MOVE_NO_DESTINATION,
        "Veuillez renseigner l'emplacement de destination",
    ),
    (
        STOCK_MOVE_STATUS_UNCHANGEABLE,
        "Le mouvement de stock {} ne peut pas passer du statut {} à {}",
    ),
    (
        STOCK_MOVE_LOCATION_UNCHANGEABLE,
        "La destination du mouvement de stock {} ne peut plus être modifiée une fois {}",
    ),
    (STOCK_MOVE_NO_LINE, "Le mouvement de stock {} n'a aucune ligne"),
    (
        UNIT_CONVERSION_MISSING,
        "Veuillez configurer la conversion d'unité de '{}' vers '{}'",
    ),
    (STOCK_MOVE_LINE_UPDATED, "Ligne mise à jour avec succès."),
    (QTY_NEGATIVE, "La quantité ne peut pas être négative"),
];
