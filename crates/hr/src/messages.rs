//! Message keys raised by the expense services and their French translations.

pub const EXPENSE_NOT_DRAFT: &str = "The expense {} is not in draft, its lines cannot be updated";
pub const EXPENSE_LINE_PARENT_NOT_DRAFT: &str =
    "The current expense {} of the line is not in draft, the line cannot be moved";
pub const EXPENSE_LINE_NEW_EXPENSE_NOT_DRAFT: &str =
    "The new expense {} is not in draft, the line cannot be moved to it";
pub const EXPENSE_LINE_NOT_IN_EXPENSE: &str = "The expense line {} does not belong to the expense {}";
pub const KILOMETRIC_ALLOWANCE_MISSING: &str =
    "No kilometric allowance rate is defined for the expense line {}";

pub const FR: &[(&str, &str)] = &[
    (
        EXPENSE_NOT_DRAFT,
        "La note de frais {} n'est pas au statut brouillon, ses lignes ne peuvent pas être modifiées",
    ),
    (
        EXPENSE_LINE_PARENT_NOT_DRAFT,
        "La note de frais actuelle {} de la ligne n'est pas au statut brouillon, la ligne ne peut pas être déplacée",
    ),
    (
        EXPENSE_LINE_NEW_EXPENSE_NOT_DRAFT,
        "La nouvelle note de frais {} n'est pas au statut brouillon, la ligne ne peut pas y être déplacée",
    ),
    (
        EXPENSE_LINE_NOT_IN_EXPENSE,
        "La ligne de frais {} n'appartient pas à la note de frais {}",
    ),
    (
        KILOMETRIC_ALLOWANCE_MISSING,
        "Aucun barème kilométrique n'est défini pour la ligne de frais {}",
    ),
];
