//! Message keys raised by the budget services and their French translations.

pub const BUDGET_KEY_NOT_FOUND: &str =
    "No budget could be reconciled with the data entered for following lines : {}";
pub const BUDGET_ROLE_NOT_AUTHORIZED: &str =
    "You can't compute the budget distribution because you are not authorized to.";
pub const NO_BUDGET_DISTRIBUTION_GENERATED: &str = "The budget distribution has not been computed yet. By launching this action, you can no longer compute the budget distribution. Do you want to proceed ?";
pub const BUDGET_EXCEED: &str = "The budget {} is exceeded by {}";
pub const BUDGET_EXCEED_CONFIRM: &str = "{} Do you want to continue ?";
pub const BUDGET_MISSING: &str =
    "No budget distribution has been set on the lines. Do you want to continue ?";
pub const BUDGET_NOT_FOUND: &str = "The budget {} does not exist";

pub const FR: &[(&str, &str)] = &[
    (
        BUDGET_KEY_NOT_FOUND,
        "Aucun budget n'a pu être rapproché des données saisies pour les lignes suivantes : {}",
    ),
    (
        BUDGET_ROLE_NOT_AUTHORIZED,
        "Vous ne pouvez pas calculer la répartition budgétaire car vous n'y êtes pas autorisé.",
    ),
    (
        NO_BUDGET_DISTRIBUTION_GENERATED,
        "La répartition budgétaire n'a pas encore été calculée. En lançant cette action, vous ne pourrez plus la calculer. Voulez-vous continuer ?",
    ),
    (BUDGET_EXCEED, "Le budget {} est dépassé de {}"),
    (BUDGET_EXCEED_CONFIRM, "{} Voulez-vous continuer ?"),
    (
        BUDGET_MISSING,
        "Aucune répartition budgétaire n'a été saisie sur les lignes. Voulez-vous continuer ?",
    ),
    (BUDGET_NOT_FOUND, "Le budget {} n'existe pas"),
];
