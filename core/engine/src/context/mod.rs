//! Javascript context.

mod intrinsics;

pub use intrinsics::{StandardConstructor, StandardObjects};

use crate::{
    builtins::{
        self,
        error::{create_error_object, ErrorKind},
        function::NativeFunction,
    },
    object::{JsObject, Object, ObjectData},
    profiler::Profiler,
    property::{Attribute, PropertyDescriptor},
    string::JsString,
    symbol::{JsSymbol, WellKnownSymbols},
    value::{JsValue, PreferredType, Type},
    JsResult,
};
use std::collections::VecDeque;

/// The default maximum nesting depth of re-entrant property access before a
/// `RangeError` is raised.
const DEFAULT_MAX_STACK_DEPTH: usize = 1000;

/// A job enqueued on the context's microtask queue.
///
/// Jobs run after the current synchronous task completes, when the embedder
/// drains the queue with [`Context::run_microtasks`].
pub struct NativeJob {
    #[allow(clippy::type_complexity)]
    f: Box<dyn FnOnce(&mut Context) -> JsResult<JsValue>>,
}

impl NativeJob {
    /// Wrap a closure as a job.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(&mut Context) -> JsResult<JsValue> + 'static,
    {
        Self { f: Box::new(f) }
    }

    /// Run the job.
    pub fn call(self, context: &mut Context) -> JsResult<JsValue> {
        (self.f)(context)
    }
}

impl std::fmt::Debug for NativeJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("NativeJob")
    }
}

/// Javascript context. It is the primary way to interact with the object
/// model.
///
/// A `Context` owns the global object, the prototype registry, the well
/// known symbols, the pending-exception slot the executor polls, and the
/// traversal state that keeps re-entrant property access bounded. It must
/// only ever be used from a single thread.
#[derive(Debug)]
pub struct Context {
    /// The global object of this context.
    global_object: JsObject,

    /// The registry of standard constructors and prototypes.
    standard_objects: StandardObjects,

    /// Cached well known symbols.
    well_known_symbols: WellKnownSymbols,

    /// Symbol hash.
    ///
    /// For now this is an incremented u64 number.
    symbol_count: u64,

    /// The currently pending exception, set by the executor surface and
    /// cleared by catch handlers.
    pending_exception: Option<JsValue>,

    /// Whether failed `[[Set]]`/`[[Delete]]` operations surface as
    /// `TypeError` through the executor surface.
    strict_mode: bool,

    /// The current nesting depth of re-entrant internal-method calls.
    stack_depth: usize,

    /// The nesting depth at which a `RangeError` is raised.
    max_stack_depth: usize,

    /// The prototype objects visited by the currently running chain walks,
    /// by identity; a repeat means a cycle.
    prototype_chain: Vec<usize>,

    /// Pending microtask jobs.
    microtasks: VecDeque<NativeJob>,

    /// Labels of the frames the executor has entered, captured into the
    /// `stack` property of new error objects.
    frames: Vec<String>,
}

impl Default for Context {
    fn default() -> Self {
        let (well_known_symbols, symbol_count) = WellKnownSymbols::new();
        let standard_objects = StandardObjects::default();

        let global_object = JsObject::new(Object::default());
        {
            let mut global = global_object.borrow_mut();
            global.data = ObjectData::global();
            global.set_prototype_instance(standard_objects.object_object().prototype().into());
        }

        let mut context = Self {
            global_object,
            standard_objects,
            well_known_symbols,
            symbol_count,
            pending_exception: None,
            strict_mode: false,
            stack_depth: 0,
            max_stack_depth: DEFAULT_MAX_STACK_DEPTH,
            prototype_chain: Vec::new(),
            microtasks: VecDeque::new(),
            frames: Vec::new(),
        };

        context.create_intrinsics();
        context
    }
}

impl Context {
    /// Create a new `Context`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets up the default global objects within Global.
    fn create_intrinsics(&mut self) {
        let _timer = Profiler::global().start_event("create_intrinsics", "context");

        // `Function.prototype` is an ordinary object here; every function
        // object inherits from it.
        let object_prototype = self.standard_objects.object_object().prototype();
        self.standard_objects
            .function_object()
            .prototype()
            .borrow_mut()
            .set_prototype_instance(object_prototype.into());

        builtins::init(self);
    }

    /// Return the global object.
    #[inline]
    pub fn global_object(&self) -> &JsObject {
        &self.global_object
    }

    /// Return the registry of standard constructors and prototypes.
    #[inline]
    pub fn standard_objects(&self) -> &StandardObjects {
        &self.standard_objects
    }

    /// Returns the structure that contains the JavaScript well known symbols.
    #[inline]
    pub fn well_known_symbols(&self) -> &WellKnownSymbols {
        &self.well_known_symbols
    }

    /// Generates a new `Symbol` internal hash.
    #[inline]
    fn generate_hash(&mut self) -> u64 {
        let hash = self.symbol_count;
        self.symbol_count += 1;
        hash
    }

    /// Construct a new `Symbol` with an optional description.
    #[inline]
    pub fn construct_symbol(&mut self, description: Option<JsString>) -> JsSymbol {
        JsSymbol::new(self.generate_hash(), description)
    }

    /// Construct an empty object with `%Object.prototype%` as its prototype.
    #[inline]
    pub fn construct_object(&self) -> JsObject {
        let object_prototype = self.standard_objects.object_object().prototype();
        JsObject::new(Object::create(object_prototype.into()))
    }

    /// The abstract operation `Call ( F, V [ , argumentsList ] )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-call
    pub fn call(&mut self, f: &JsValue, this: &JsValue, args: &[JsValue]) -> JsResult<JsValue> {
        match f {
            JsValue::Object(object) if object.is_callable() => object.call(this, args, self),
            _ => self.throw_type_error("not a function"),
        }
    }

    /// Converts an object to a primitive, trying the `valueOf`/`toString`
    /// protocol in hint order.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-ordinarytoprimitive
    pub(crate) fn ordinary_to_primitive(
        &mut self,
        o: &JsValue,
        hint: PreferredType,
    ) -> JsResult<JsValue> {
        // 1. Assert: Type(O) is Object.
        debug_assert!(o.get_type() == Type::Object);
        // 2. Assert: hint is either string or number.
        debug_assert!(hint == PreferredType::String || hint == PreferredType::Number);

        // 3 - 4. Pick the method order for the hint.
        let method_names = if hint == PreferredType::String {
            ["toString", "valueOf"]
        } else {
            ["valueOf", "toString"]
        };

        let obj = o.as_object().expect("asserted to be an object").clone();

        // 5. For each name of methodNames, do
        for name in method_names {
            // a. Let method be ? Get(O, name).
            let method = obj.get(name, self)?;
            // b. If IsCallable(method) is true, then
            if method.is_callable() {
                // i. Let result be ? Call(method, O).
                let result = self.call(&method, o, &[])?;
                // ii. If Type(result) is not Object, return result.
                if !result.is_object() {
                    return Ok(result);
                }
            }
        }

        // 6. Throw a TypeError exception.
        self.throw_type_error("cannot convert object to primitive value")
    }

    /// Constructs an error object of the given kind with the specified message.
    pub fn construct_error<M>(&mut self, kind: ErrorKind, message: M) -> JsValue
    where
        M: Into<String>,
    {
        create_error_object(kind, message.into(), self)
    }

    /// Constructs a `TypeError` with the specified message.
    pub fn construct_type_error<M>(&mut self, message: M) -> JsValue
    where
        M: Into<String>,
    {
        self.construct_error(ErrorKind::Type, message)
    }

    /// Throws a `TypeError` with the specified message.
    pub fn throw_type_error<M, R>(&mut self, message: M) -> JsResult<R>
    where
        M: Into<String>,
    {
        Err(self.construct_type_error(message))
    }

    /// Constructs a `RangeError` with the specified message.
    pub fn construct_range_error<M>(&mut self, message: M) -> JsValue
    where
        M: Into<String>,
    {
        self.construct_error(ErrorKind::Range, message)
    }

    /// Throws a `RangeError` with the specified message.
    pub fn throw_range_error<M, R>(&mut self, message: M) -> JsResult<R>
    where
        M: Into<String>,
    {
        Err(self.construct_range_error(message))
    }

    /// Constructs a `SyntaxError` with the specified message.
    pub fn construct_syntax_error<M>(&mut self, message: M) -> JsValue
    where
        M: Into<String>,
    {
        self.construct_error(ErrorKind::Syntax, message)
    }

    /// Throws a `SyntaxError` with the specified message.
    pub fn throw_syntax_error<M, R>(&mut self, message: M) -> JsResult<R>
    where
        M: Into<String>,
    {
        Err(self.construct_syntax_error(message))
    }

    /// Constructs a `ReferenceError` with the specified message.
    pub fn construct_reference_error<M>(&mut self, message: M) -> JsValue
    where
        M: Into<String>,
    {
        self.construct_error(ErrorKind::Reference, message)
    }

    /// Throws a `ReferenceError` with the specified message.
    pub fn throw_reference_error<M, R>(&mut self, message: M) -> JsResult<R>
    where
        M: Into<String>,
    {
        Err(self.construct_reference_error(message))
    }

    /// Whether strict mode is in effect for the executor surface.
    #[inline]
    pub fn strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// Set the strict mode flag consulted by the executor surface.
    #[inline]
    pub fn set_strict_mode(&mut self, strict: bool) {
        self.strict_mode = strict;
    }

    /// Whether an exception is pending.
    #[inline]
    pub fn has_pending_exception(&self) -> bool {
        self.pending_exception.is_some()
    }

    /// Record a thrown value in the pending-exception slot.
    ///
    /// An already pending exception is left in place: the first throw of a
    /// synchronous step is the one the executor observes.
    #[inline]
    pub fn set_pending_exception(&mut self, error: JsValue) {
        if self.pending_exception.is_none() {
            self.pending_exception = Some(error);
        }
    }

    /// Take the pending exception, clearing the slot.
    #[inline]
    pub fn take_pending_exception(&mut self) -> Option<JsValue> {
        self.pending_exception.take()
    }

    /// Clear the pending exception, as a catch handler does.
    #[inline]
    pub fn clear_pending_exception(&mut self) {
        self.pending_exception = None;
    }

    /// The configured maximum nesting depth.
    #[inline]
    pub fn max_stack_depth(&self) -> usize {
        self.max_stack_depth
    }

    /// Configure the maximum nesting depth of re-entrant property access.
    #[inline]
    pub fn set_max_stack_depth(&mut self, depth: usize) {
        self.max_stack_depth = depth;
    }

    /// Enter one level of re-entrant property access, raising `RangeError`
    /// at the depth cap without recursing further.
    pub(crate) fn enter_nested(&mut self) -> JsResult<()> {
        if self.stack_depth >= self.max_stack_depth {
            return Err(self.construct_range_error("Maximum call stack size exceeded"));
        }
        self.stack_depth += 1;
        Ok(())
    }

    /// Leave one level of re-entrant property access.
    pub(crate) fn leave_nested(&mut self) {
        self.stack_depth = self.stack_depth.saturating_sub(1);
    }

    /// Record a prototype as visited by the running chain walk. Returns
    /// `false` when the prototype was already on the path, i.e. the chain is
    /// cyclic.
    pub(crate) fn enter_prototype_chain(&mut self, prototype: &JsObject) -> bool {
        let identity = prototype.as_ref() as *const _ as usize;
        if self.prototype_chain.contains(&identity) {
            return false;
        }
        self.prototype_chain.push(identity);
        true
    }

    /// Unwind the chain-walk marker placed by [`Self::enter_prototype_chain`].
    pub(crate) fn leave_prototype_chain(&mut self, prototype: &JsObject) {
        let identity = prototype.as_ref() as *const _ as usize;
        if let Some(position) = self.prototype_chain.iter().rposition(|p| *p == identity) {
            self.prototype_chain.remove(position);
        }
    }

    /// Detach the visited set of the running chain walk.
    ///
    /// Function invocation starts a fresh logical operation: a getter called
    /// mid-walk must be able to traverse the same prototypes again. The
    /// caller restores the detached set when the invocation returns.
    pub(crate) fn take_prototype_chain(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.prototype_chain)
    }

    /// Reattach a visited set detached by [`Self::take_prototype_chain`].
    pub(crate) fn restore_prototype_chain(&mut self, chain: Vec<usize>) {
        self.prototype_chain = chain;
    }

    /// Enqueue a microtask job; it runs when the embedder drains the queue.
    #[inline]
    pub fn enqueue_microtask(&mut self, job: NativeJob) {
        self.microtasks.push_back(job);
    }

    /// Drain the microtask queue, running every job in FIFO order.
    ///
    /// A job that throws parks its error in the pending-exception slot; the
    /// remaining jobs still run.
    pub fn run_microtasks(&mut self) {
        while let Some(job) = self.microtasks.pop_front() {
            if let Err(error) = job.call(self) {
                self.set_pending_exception(error);
            }
        }
    }

    /// Push a frame label onto the stack captured by new error objects.
    #[inline]
    pub fn push_frame<L: Into<String>>(&mut self, label: L) {
        self.frames.push(label.into());
    }

    /// Pop the last frame label.
    #[inline]
    pub fn pop_frame(&mut self) {
        self.frames.pop();
    }

    /// Render the current frame stack, innermost first.
    pub(crate) fn capture_stack_trace(&self) -> JsString {
        let mut trace = String::new();
        for frame in self.frames.iter().rev() {
            trace.push_str("    at ");
            trace.push_str(frame);
            trace.push('\n');
        }
        trace.into()
    }

    /// Register a property on the global object with the given attributes.
    pub fn register_global_property<K, V>(&mut self, key: K, value: V, attribute: Attribute)
    where
        K: Into<crate::property::PropertyKey>,
        V: Into<JsValue>,
    {
        self.global_object.insert(
            key,
            PropertyDescriptor::builder()
                .value(value)
                .attributes(attribute),
        );
    }

    /// Register a builtin constructor on the global object with the
    /// conventional attributes.
    pub(crate) fn register_global_builtin<K>(&mut self, key: K, constructor: JsObject)
    where
        K: Into<crate::property::PropertyKey>,
    {
        self.register_global_property(
            key,
            constructor,
            Attribute::WRITABLE | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE,
        );
    }

    /// Register a global function, implemented as a native function pointer.
    pub fn register_global_function(
        &mut self,
        name: &str,
        length: usize,
        body: NativeFunction,
    ) {
        let function = builtins::function::make_builtin_fn(body, name, length, self);
        self.register_global_builtin(name, function);
    }
}
