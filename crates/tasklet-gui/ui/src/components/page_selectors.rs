use tasklet_core::view::PageSelector;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct PageSelectorsProps {
  pub pages:     Vec<PageSelector>,
  pub on_select: Callback<usize>
}

#[function_component(PageSelectors)]
pub fn page_selectors(
  props: &PageSelectorsProps
) -> Html {
  html! {
      <div id="pagination" class="pagination">
          {
              for props.pages.iter().map(|page| {
                  let number = page.number;
                  let on_select = props.on_select.clone();
                  html! {
                      <button
                          key={number.to_string()}
                          class={classes!(page.active.then_some("active"))}
                          onclick={move |_| on_select.emit(number)}
                      >
                          { number.to_string() }
                      </button>
                  }
              })
          }
      </div>
  }
}
