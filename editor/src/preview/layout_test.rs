use super::*;

#[test]
fn classifies_common_widgets() {
    assert_eq!(widget_kind("Button"), WidgetKind::Button);
    assert_eq!(widget_kind("ImageButton"), WidgetKind::Button);
    assert_eq!(widget_kind("TextView"), WidgetKind::Label);
    assert_eq!(widget_kind("EditText"), WidgetKind::Input);
    assert_eq!(widget_kind("ImageView"), WidgetKind::Image);
    assert_eq!(widget_kind("CheckBox"), WidgetKind::Toggle);
    assert_eq!(widget_kind("Switch"), WidgetKind::Toggle);
}

#[test]
fn layout_suffix_means_container() {
    assert_eq!(widget_kind("LinearLayout"), WidgetKind::Container);
    assert_eq!(widget_kind("ConstraintLayout"), WidgetKind::Container);
    assert_eq!(widget_kind("FrameLayout"), WidgetKind::Container);
    assert_eq!(widget_kind("ScrollView"), WidgetKind::Container);
}

#[test]
fn qualified_custom_views_use_final_segment() {
    assert_eq!(widget_kind("com.google.android.material.floatingactionbutton.FloatingActionButton"), WidgetKind::Button);
    assert_eq!(widget_kind("androidx.constraintlayout.widget.ConstraintLayout"), WidgetKind::Container);
}

#[test]
fn unrecognized_elements_are_unknown() {
    assert_eq!(widget_kind("SurfaceView"), WidgetKind::Unknown);
    assert_eq!(widget_kind("com.example.Sparkline"), WidgetKind::Unknown);
}
