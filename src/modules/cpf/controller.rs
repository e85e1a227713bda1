use axum::{Json, extract::Path};
use classgrid_models::CpfCheckResponse;
use tracing::instrument;

/// Check a CPF number
///
/// Accepts the number with or without `.` and `-` separators and reports its
/// canonical form, whether it is well formed, whether its check digits match,
/// and its display form.
#[utoipa::path(
    get,
    path = "/api/cpf/{value}",
    params(
        ("value" = String, Path, description = "CPF to check, e.g. 529.982.247-25")
    ),
    responses(
        (status = 200, description = "Validation result", body = CpfCheckResponse)
    ),
    tag = "CPF"
)]
#[instrument]
pub async fn check_cpf(Path(value): Path<String>) -> Json<CpfCheckResponse> {
    Json(CpfCheckResponse::check(&value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_check_cpf_reports_display_form() {
        let Json(body) = check_cpf(Path("52998224725".to_string())).await;
        assert!(body.valid);
        assert_eq!(body.display, "529.982.247-25");
    }

    #[tokio::test]
    async fn test_check_cpf_repeated_digits() {
        let Json(body) = check_cpf(Path("111.111.111-11".to_string())).await;
        assert!(body.well_formed);
        assert!(!body.valid);
    }
}
