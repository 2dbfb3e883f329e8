//! Tests for interface_ui

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use core_kernel::InstallmentId;
use interface_ui::dto::RemainderActionCode;
use interface_ui::handlers::amount_input::render_amount_typed;
use interface_ui::handlers::calculator::{evaluate, on_calculator_input, CalculatorInput};
use interface_ui::handlers::collection::open_partial_payment;
use interface_ui::render::{elements, AlertLevel, RenderInstruction};
use interface_ui::{
    CollectionController, CollectionGateway, PartialPaymentForm, TowerCollectionGateway, UiConfig,
    UiError,
};
use test_utils::{
    date, installment_id_strategy, typed_text_strategy, DateFixtures, IdFixtures, MoneyFixtures,
};

/// What the fake backend saw
#[derive(Debug, Clone)]
struct Seen {
    installment: u64,
    csrf: Option<String>,
    content_type: Option<String>,
    body: Bytes,
}

type Log = Arc<Mutex<Vec<Seen>>>;

const REJECTED_WITH_MESSAGE: u64 = 99;
const REJECTED_SILENTLY: u64 = 98;
const SLOW: u64 = 97;

async fn cobrar(
    State(log): State<Log>,
    Path(installment): Path<u64>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Value> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    log.lock().unwrap().push(Seen {
        installment,
        csrf: header("x-csrftoken"),
        content_type: header("content-type"),
        body,
    });

    match installment {
        REJECTED_WITH_MESSAGE => Json(json!({"success": false, "message": "La cuota ya fue cobrada"})),
        REJECTED_SILENTLY => Json(json!({"success": false})),
        SLOW => {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Json(json!({"success": true}))
        }
        _ => Json(json!({
            "success": true,
            "message": "Pago registrado exitosamente",
            "cuota": {"id": installment, "estado": "PA"},
            "estadisticas": {"total_cobrado_hoy": 1234567.5, "cantidad_cobros_hoy": 7}
        })),
    }
}

fn backend() -> (Router, Log) {
    let log: Log = Arc::default();
    let router = Router::new()
        .route("/api/cobrar/:id/", post(cobrar))
        .with_state(log.clone());
    (router, log)
}

fn config() -> UiConfig {
    UiConfig {
        base_url: "http://cobranza.test".to_string(),
        csrf_token: "csrf-abc".to_string(),
        ..Default::default()
    }
}

fn controller() -> (CollectionController<TowerCollectionGateway<Router>>, Log) {
    let (router, log) = backend();
    (
        CollectionController::new(TowerCollectionGateway::new(router, config())),
        log,
    )
}

fn calculator(principal: &str, rate: &str, installments: &str) -> CalculatorInput {
    CalculatorInput {
        principal: principal.to_string(),
        rate: rate.to_string(),
        installments: installments.to_string(),
        credit_limit: None,
    }
}

// ============================================================================
// Calculator
// ============================================================================

mod calculator_tests {
    use super::*;

    #[test]
    fn test_summary_for_example_loan() {
        let ins = on_calculator_input(&calculator("100.000", "10", "12"));
        assert_eq!(
            ins,
            vec![
                RenderInstruction::set_text(elements::TOTAL_PAYABLE, "$110.000"),
                RenderInstruction::set_text(elements::INSTALLMENT_AMOUNT, "$9.167"),
                RenderInstruction::Show {
                    target: elements::LOAN_SUMMARY
                },
                RenderInstruction::HideAlert {
                    target: elements::CREDIT_ALERT
                },
            ]
        );
    }

    #[test]
    fn test_missing_rate_and_count_use_defaults() {
        let view = evaluate(&calculator("50.000", "", "")).unwrap();
        assert_eq!(view.quote.total_payable, dec!(50000));
        assert_eq!(view.quote.installment_count, 1);
    }

    #[test]
    fn test_oversized_count_is_not_one_installment() {
        let view = evaluate(&calculator("100.000", "10", "99999999999")).unwrap();
        assert_eq!(view.quote.principal, MoneyFixtures::principal());
        assert_eq!(view.quote.installment_count, u32::MAX);
        assert_eq!(view.quote.total_payable, dec!(110000));
        assert!(view.quote.installment_amount < dec!(1));
    }

    #[test]
    fn test_fractional_rate() {
        let view = evaluate(&calculator("1.000", "12.5", "5")).unwrap();
        assert_eq!(view.quote.installment_amount, dec!(225));
    }

    #[test]
    fn test_zero_principal_hides_summary() {
        let ins = on_calculator_input(&calculator("0", "10", "12"));
        assert_eq!(
            ins,
            vec![RenderInstruction::Hide {
                target: elements::LOAN_SUMMARY
            }]
        );
    }

    #[test]
    fn test_warning_near_credit_limit() {
        let input = CalculatorInput {
            credit_limit: Some(MoneyFixtures::credit_limit()),
            ..calculator("100.000", "10", "12")
        };
        let ins = on_calculator_input(&input);
        assert_eq!(
            ins.last(),
            Some(&RenderInstruction::ShowAlert {
                target: elements::CREDIT_ALERT,
                level: AlertLevel::Warning,
                text: "El monto está cerca del límite de crédito disponible ($120.000).".to_string(),
            })
        );
    }

    #[test]
    fn test_danger_over_credit_limit() {
        let input = CalculatorInput {
            credit_limit: Some(dec!(80000)),
            ..calculator("100.000", "10", "12")
        };
        let ins = on_calculator_input(&input);
        assert_eq!(
            ins.last(),
            Some(&RenderInstruction::ShowAlert {
                target: elements::CREDIT_ALERT,
                level: AlertLevel::Danger,
                text: "¡Atención! El monto ingresado ($100.000) excede el límite de crédito disponible ($80.000)."
                    .to_string(),
            })
        );
    }

    #[test]
    fn test_input_deserializes_from_page_json() {
        let input: CalculatorInput = serde_json::from_value(json!({
            "principal": "25.000",
            "rate": "20",
            "installments": "30"
        }))
        .unwrap();
        assert_eq!(input.credit_limit, None);
        assert_eq!(evaluate(&input).unwrap().quote.total_payable, dec!(30000));
    }
}

// ============================================================================
// Partial payment modal
// ============================================================================

mod modal_tests {
    use super::*;

    #[test]
    fn test_open_partial_payment() {
        let today = DateFixtures::today();
        let ins = open_partial_payment(InstallmentId::new(42), dec!(9000.50), Some("Ana Pérez"), today);

        assert!(ins.contains(&RenderInstruction::set_value(elements::PARTIAL_MAX, "9000.5")));
        assert!(ins.contains(&RenderInstruction::set_text(elements::PARTIAL_MAX_LABEL, "$9.001")));
        assert!(ins.contains(&RenderInstruction::SetPlaceholder {
            target: elements::PARTIAL_AMOUNT,
            text: "9.001".to_string(),
        }));
        assert!(ins.contains(&RenderInstruction::Hide {
            target: elements::SPECIAL_DATE_CONTAINER
        }));
        assert!(ins.contains(&RenderInstruction::set_text(elements::PARTIAL_CLIENT_NAME, "Ana Pérez")));
        assert!(ins.contains(&RenderInstruction::ShowModal {
            target: elements::PARTIAL_MODAL
        }));
    }

    #[test]
    fn test_open_without_client_name() {
        let ins = open_partial_payment(InstallmentId::new(1), dec!(100), Some(""), DateFixtures::today());
        assert!(!ins.iter().any(|i| matches!(
            i,
            RenderInstruction::SetText { target, .. } if *target == elements::PARTIAL_CLIENT_NAME
        )));
    }
}

// ============================================================================
// Gateway
// ============================================================================

mod gateway_tests {
    use super::*;

    #[tokio::test]
    async fn test_full_collection_request_is_exact() {
        let (router, log) = backend();
        let gateway = TowerCollectionGateway::new(router, config());

        let response = gateway.submit(InstallmentId::new(15), None).await.unwrap();
        assert!(response.success);
        assert_eq!(response.stats.unwrap().collections_today, 7);

        let seen = log.lock().unwrap()[0].clone();
        assert_eq!(seen.installment, 15);
        assert_eq!(seen.csrf.as_deref(), Some("csrf-abc"));
        assert_eq!(seen.content_type.as_deref(), Some("application/json"));
        assert!(seen.body.is_empty());
    }

    #[tokio::test]
    async fn test_rejection_surfaces_server_message() {
        let (router, _) = backend();
        let gateway = TowerCollectionGateway::new(router, config());

        let err = gateway
            .submit(InstallmentId::new(REJECTED_WITH_MESSAGE), None)
            .await
            .unwrap_err();
        assert!(matches!(&err, UiError::Rejected(m) if m == "La cuota ya fue cobrada"));
    }

    #[tokio::test]
    async fn test_rejection_without_message() {
        let (router, _) = backend();
        let gateway = TowerCollectionGateway::new(router, config());

        let err = gateway
            .submit(InstallmentId::new(REJECTED_SILENTLY), None)
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Error al procesar el pago");
    }

    #[tokio::test]
    async fn test_unknown_route_is_invalid_response() {
        let (router, _) = backend();
        let config = UiConfig {
            base_url: "http://cobranza.test/otro".to_string(),
            ..config()
        };
        let gateway = TowerCollectionGateway::new(router, config);

        let err = gateway.submit(InstallmentId::new(1), None).await.unwrap_err();
        assert!(matches!(err, UiError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_timeout() {
        let (router, _) = backend();
        let config = UiConfig {
            request_timeout_ms: 20,
            ..config()
        };
        let gateway = TowerCollectionGateway::new(router, config);

        let err = gateway.submit(InstallmentId::new(SLOW), None).await.unwrap_err();
        assert!(matches!(err, UiError::Timeout(20)));
    }
}

// ============================================================================
// Collection controller
// ============================================================================

mod controller_tests {
    use super::*;

    #[tokio::test]
    async fn test_full_collection_marks_paid_and_updates_stats() {
        let (controller, _) = controller();
        let id = IdFixtures::installment_id();

        let ins = controller.collect_full(id).await;
        assert_eq!(
            ins,
            vec![
                RenderInstruction::success("¡Pago registrado!"),
                RenderInstruction::MarkInstallmentPaid { installment: id },
                RenderInstruction::set_text(elements::COLLECTED_TODAY, "$1.234.568"),
                RenderInstruction::set_text(elements::COLLECTIONS_TODAY, "7"),
            ]
        );
        assert!(!controller.is_in_flight(id));
    }

    #[tokio::test]
    async fn test_failed_collection_reenables_button() {
        let (controller, _) = controller();
        let id = InstallmentId::new(REJECTED_WITH_MESSAGE);

        let ins = controller.collect_full(id).await;
        assert_eq!(
            ins,
            vec![
                RenderInstruction::error("La cuota ya fue cobrada"),
                RenderInstruction::EnableControl { installment: id },
            ]
        );
        assert!(!controller.is_in_flight(id));
    }

    #[tokio::test]
    async fn test_double_click_posts_once() {
        let (controller, log) = controller();
        let id = InstallmentId::new(SLOW);

        let (first, second) = tokio::join!(controller.collect_full(id), controller.collect_full(id));

        assert!(second.is_empty());
        assert_eq!(first[0], RenderInstruction::success("¡Pago registrado!"));
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_partial_collection_posts_body_and_reloads() {
        let (controller, log) = controller();
        let form = PartialPaymentForm {
            installment: InstallmentId::new(5),
            max_amount: dec!(9000),
            amount_text: "4.000".to_string(),
            action: RemainderActionCode::Special,
            special_date: Some(date(2024, 2, 1)),
        };

        let ins = controller.collect_partial(&form).await;
        assert_eq!(
            ins,
            vec![
                RenderInstruction::success("Pago registrado exitosamente"),
                RenderInstruction::ReloadPage,
            ]
        );

        let seen = log.lock().unwrap()[0].clone();
        let body: Value = serde_json::from_slice(&seen.body).unwrap();
        assert_eq!(
            body,
            json!({"monto": 4000.0, "accion_restante": "especial", "fecha_especial": "2024-02-01"})
        );
    }

    #[tokio::test]
    async fn test_invalid_partial_form_never_posts() {
        let (controller, log) = controller();
        let form = PartialPaymentForm {
            installment: InstallmentId::new(5),
            max_amount: dec!(9000),
            amount_text: "12.000".to_string(),
            action: RemainderActionCode::Ignore,
            special_date: None,
        };

        let ins = controller.collect_partial(&form).await;
        assert_eq!(
            ins,
            vec![RenderInstruction::error("El monto no puede ser mayor al pendiente")]
        );
        assert!(log.lock().unwrap().is_empty());
    }
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn modal_always_targets_the_clicked_installment(id in installment_id_strategy()) {
            let ins = open_partial_payment(id, dec!(500), None, DateFixtures::today());
            prop_assert_eq!(
                &ins[0],
                &RenderInstruction::set_value(elements::PARTIAL_INSTALLMENT_ID, id.to_string())
            );
        }

        #[test]
        fn typed_amount_keeps_cursor_inside_value(text in typed_text_strategy(), cursor in 0usize..30) {
            let ins = render_amount_typed(elements::PRINCIPAL_INPUT, &text, cursor);
            let (value, position) = match (&ins[0], &ins[1]) {
                (
                    RenderInstruction::SetValue { value, .. },
                    RenderInstruction::SetCursor { position, .. },
                ) => (value.clone(), *position),
                other => panic!("unexpected instructions {:?}", other),
            };
            prop_assert!(position <= value.chars().count());
        }
    }
}
