/// Defines an actor state type together with a handle wrapper type.
///
/// Doc comments placed before `#[wrapper_type(..)]` go to the wrapper,
/// any other attributes after it go to the state struct. The wrapper
/// gets private `spawn` and `handle` methods, so that the defining
/// module can add its own public API on top of the raw [`crate::Actor`].
#[macro_export]
macro_rules! define_actor {
    {
        $(#[doc = $doc:expr])*
        #[wrapper_type($wrapper_type:ident)]
        $(#[$state_attr:meta])*
        $v:vis struct $state_type:ident {
            $($state_items:tt)*
        }
    } => {
        $(#[$state_attr])*
        struct $state_type {
            $($state_items)*
        }

        $(#[doc = $doc])*
        $v struct $wrapper_type {
            handle: $crate::Actor<$state_type>,
        }

        impl $wrapper_type {
            #[inline]
            fn spawn(state: $state_type, label: Option<&str>) -> Self {
                Self {
                    handle: $crate::Actor::spawn(state, label),
                }
            }

            #[inline]
            fn handle(&self) -> &$crate::Actor<$state_type> {
                &self.handle
            }
        }

        impl Clone for $wrapper_type {
            #[inline]
            fn clone(&self) -> Self {
                Self {
                    handle: self.handle.clone(),
                }
            }
        }
    };
}
