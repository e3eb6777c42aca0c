use super::*;

fn filled_form() -> FormState {
    let mut form = FormState::new();
    form.set_field(PromotionField::Id, "12".into());
    form.set_field(PromotionField::ProductId, "7".into());
    form.set_field(PromotionField::ProductName, "Fall Sale".into());
    form.set_field(PromotionField::Category, "Clothing".into());
    form.set_field(PromotionField::Amount, "20".into());
    form.set_field(PromotionField::Description, "autumn".into());
    form.set_field(PromotionField::FromDate, "2024-01-01".into());
    form.set_field(PromotionField::ToDate, "2024-02-01".into());
    form
}

#[test]
fn field_names_match_page_ids() {
    assert_eq!(PromotionField::ProductName.element_id(), "promotion_product_name");
    assert_eq!(PromotionField::ProductName.name(), "product_name");
    assert_eq!(
        PromotionField::from_name("promotion_to_date"),
        Some(PromotionField::ToDate)
    );
    assert_eq!(PromotionField::from_name("amount"), Some(PromotionField::Amount));
    assert_eq!(PromotionField::from_name("available"), None);
}

#[test]
fn leading_int_follows_lenient_form_coercion() {
    assert_eq!(parse_leading_int("20"), Some(20));
    assert_eq!(parse_leading_int("  7 "), Some(7));
    assert_eq!(parse_leading_int("12abc"), Some(12));
    assert_eq!(parse_leading_int("3.9"), Some(3));
    assert_eq!(parse_leading_int("-4"), Some(-4));
    assert_eq!(parse_leading_int(""), None);
    assert_eq!(parse_leading_int("abc"), None);
    assert_eq!(parse_leading_int("--4"), None);
    assert_eq!(parse_leading_int("99999999999999999999999"), None);
}

#[test]
fn payload_reads_every_field() {
    let payload = read_payload(&filled_form());

    assert_eq!(payload.id, Some(PromotionId(12)));
    assert_eq!(payload.product_id, Some(ProductId(7)));
    assert_eq!(payload.product_name, "Fall Sale");
    assert_eq!(payload.category, "Clothing");
    assert_eq!(payload.amount, Some(20));
    assert_eq!(payload.description, "autumn");
    assert_eq!(payload.from_date, "2024-01-01");
    assert_eq!(payload.to_date, "2024-02-01");
}

#[test]
fn payload_uses_missing_value_for_blank_or_non_numeric_numbers() {
    let mut form = filled_form();
    form.set_field(PromotionField::Id, String::new());
    form.set_field(PromotionField::Amount, "lots".into());

    let payload = read_payload(&form);
    assert_eq!(payload.id, None);
    assert_eq!(payload.amount, None);
    assert_eq!(payload.product_id, Some(ProductId(7)));
}

#[test]
fn populate_truncates_timestamps_for_display() {
    let mut form = FormState::new();
    let promotion = Promotion {
        id: Some(PromotionId(3)),
        product_id: Some(ProductId(9)),
        product_name: "Winter".into(),
        category: "BOGOF".into(),
        amount: Some(2),
        description: None,
        from_date: "2024-01-01T00:00:00".into(),
        to_date: "2024-03-01T00:00:00".into(),
    };

    populate(&mut form, &promotion);

    assert_eq!(form.field(PromotionField::Id), "3");
    assert_eq!(form.field(PromotionField::ProductId), "9");
    assert_eq!(form.field(PromotionField::Description), "");
    assert_eq!(form.field(PromotionField::FromDate), "2024-01-01");
    assert_eq!(form.field(PromotionField::ToDate), "2024-03-01");
}

#[test]
fn clear_empties_every_field_and_keeps_flash() {
    let mut form = filled_form();
    form.flash("Success".into());

    clear(&mut form);

    assert!(form.is_blank());
    assert_eq!(form.flash_message(), Some("Success"));
}

#[test]
fn path_id_prefers_the_coerced_number() {
    assert_eq!(path_id(" 12abc"), "12");
    assert_eq!(path_id(""), "");
    assert_eq!(path_id(" x "), "x");
}
