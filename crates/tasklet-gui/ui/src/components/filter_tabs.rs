use tasklet_core::Filter;
use tasklet_core::view::FilterTab;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct FilterTabsProps {
  pub tabs:      Vec<FilterTab>,
  pub on_select: Callback<Filter>
}

#[function_component(FilterTabs)]
pub fn filter_tabs(
  props: &FilterTabsProps
) -> Html {
  html! {
      <div class="filters">
          {
              for props.tabs.iter().map(|tab| {
                  let filter = tab.filter.clone();
                  let on_select = props.on_select.clone();
                  html! {
                      <button
                          id={format!("filter-{}", tab.filter.as_str())}
                          class={classes!("filter", tab.active.then_some("active"))}
                          onclick={move |_| on_select.emit(filter.clone())}
                      >
                          { tab.filter.label() }
                      </button>
                  }
              })
          }
      </div>
  }
}
