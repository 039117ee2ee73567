pub const SALE_ORDER_MERGE_LIST_EMPTY: &str = "List of sale orders to merge is empty";
pub const SALE_ORDER_MERGE_ERROR_CURRENCY: &str =
    "The currency is required and must be the same for all sale orders";
pub const SALE_ORDER_MERGE_ERROR_CLIENT_PARTNER: &str =
    "The client is required and must be the same for all sale orders";
pub const SALE_ORDER_MERGE_ERROR_COMPANY: &str =
    "The company is required and must be the same for all sale orders";
pub const SALE_ORDER_MERGE_ERROR_TAX_NUMBER: &str = "The tax number must be the same for all sale orders";
pub const SALE_ORDER_MERGE_ERROR_FISCAL_POSITION: &str =
    "The fiscal position must be the same for all sale orders";
pub const SALE_ORDER_MERGE_ERRORS: &str = "The sale orders cannot be merged: {}";
pub const SALE_ORDER_MERGE_NOT_DRAFT: &str = "The sale order {} is not a draft or a quotation and cannot be merged";
pub const LOYALTY_ACCOUNT_MISSING: &str = "No loyalty account for the partner {} in the company {}";

pub const FR: &[(&str, &str)] = &[
    (SALE_ORDER_MERGE_LIST_EMPTY, "La liste des devis à fusionner est vide"),
    (
        SALE_ORDER_MERGE_ERROR_CURRENCY,
        "La devise est obligatoire et doit être identique pour tous les devis",
    ),
    (
        SALE_ORDER_MERGE_ERROR_CLIENT_PARTNER,
        "Le client est obligatoire et doit être identique pour tous les devis",
    ),
    (
        SALE_ORDER_MERGE_ERROR_COMPANY,
        "La société est obligatoire et doit être identique pour tous les devis",
    ),
    (
        SALE_ORDER_MERGE_ERROR_TAX_NUMBER,
        "Le numéro de TVA doit être identique pour tous les devis",
    ),
    (
        SALE_ORDER_MERGE_ERROR_FISCAL_POSITION,
        "La position fiscale doit être identique pour tous les devis",
    ),
    (SALE_ORDER_MERGE_ERRORS, "Les devis ne peuvent pas être fusionnés : {}"),
    (
        SALE_ORDER_MERGE_NOT_DRAFT,
        "Le devis {} n'est pas au statut brouillon ou devis et ne peut pas être fusionné",
    ),
    (
        LOYALTY_ACCOUNT_MISSING,
        "Aucun compte de fidélité pour le partenaire {} dans la société {}",
    ),
];
