use core::fmt;

// `evaluate` in the host cannot call variadic functions, so the injected
// code sticks to plain message sends. Lists copied from the runtime are not
// freed: some evaluators fail the whole expression on `free`.
const METHODS: &str = r#"
    unsigned int outCount;
    Method *methods = (Method *)class_copyMethodList((Class)$cls, &outCount);
    NSMutableArray *result = (id)[NSMutableArray array];

    for (int i = 0; i < outCount; i++) {
      NSMutableDictionary *m = (id)[NSMutableDictionary dictionary];

      SEL name = (SEL)method_getName(methods[i]);
      [m setObject:(id)NSStringFromSelector(name) forKey:@"name"];

      char *encoding = (char *)method_getTypeEncoding(methods[i]);
      [m setObject:(id)[NSString stringWithUTF8String:encoding] forKey:@"type_encoding"];

      NSMutableArray *types = (id)[NSMutableArray array];
      NSInteger args = (NSInteger)method_getNumberOfArguments(methods[i]);
      for (int idx = 0; idx < args; idx++) {
        char *type = (char *)method_copyArgumentType(methods[i], idx);
        [types addObject:(id)[NSString stringWithUTF8String:type]];
      }
      [m setObject:types forKey:@"parameters_type"];

      char *ret_type = (char *)method_copyReturnType(methods[i]);
      [m setObject:(id)[NSString stringWithUTF8String:ret_type] forKey:@"return_type"];

      long imp = (long)method_getImplementation(methods[i]);
      [m setObject:[NSNumber numberWithLongLong:imp] forKey:@"implementation"];

      [result addObject:m];
    }
    RETURN(result);
"#;

const PROPERTIES: &str = r#"
    NSMutableArray *result = (id)[NSMutableArray array];
    unsigned int count;
    objc_property_t *props = (objc_property_t *)class_copyPropertyList((Class)$cls, &count);
    for (int i = 0; i < count; i++) {
      NSMutableDictionary *dict = (id)[NSMutableDictionary dictionary];

      char *name = (char *)property_getName(props[i]);
      [dict setObject:(id)[NSString stringWithUTF8String:name] forKey:@"name"];

      char *attrstr = (char *)property_getAttributes(props[i]);
      [dict setObject:(id)[NSString stringWithUTF8String:attrstr] forKey:@"attributes_string"];

      NSMutableDictionary *attrsDict = (id)[NSMutableDictionary dictionary];
      unsigned int pcount;
      objc_property_attribute_t *attrs = (objc_property_attribute_t *)property_copyAttributeList(props[i], &pcount);
      for (int j = 0; j < pcount; j++) {
        NSString *key = (id)[NSString stringWithUTF8String:(char *)attrs[j].name];
        NSString *value = (id)[NSString stringWithUTF8String:(char *)attrs[j].value];
        [attrsDict setObject:value forKey:key];
      }
      [dict setObject:attrsDict forKey:@"attributes"];

      [result addObject:dict];
    }
    RETURN(result);
"#;

const VALUE: &str = r#"
    id value = (id)[(id)$obj valueForKey:@"$key"];
    RETURN(value ? (id)[value description] : nil);
"#;

#[derive(Debug, PartialEq)]
/// A request for structured metadata from the target process.
///
/// Each query knows the Objective-C source that answers it; a host backed by
/// a live evaluator injects `expression()`, other hosts may match on the
/// variant directly.
pub enum Query<'a> {
    /// Methods of `class`. Passing a metaclass yields class methods.
    Methods { class: &'a str },
    /// Declared properties of `class`.
    Properties { class: &'a str },
    /// Description of the `property` value of `object`, or nil.
    Value { object: &'a str, property: &'a str },
}

impl Query<'_> {
    #[must_use]
    /// Objective-C source evaluated in the target process.
    pub fn expression(&self) -> String {
        match self {
            Query::Methods { class } => METHODS.replace("$cls", class),
            Query::Properties { class } => PROPERTIES.replace("$cls", class),
            Query::Value { object, property } => VALUE
                .replace("$obj", object)
                .replace("$key", property),
        }
    }
}

impl fmt::Display for Query<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Methods { class } => write!(f, "methods of {class}"),
            Query::Properties { class } => write!(f, "properties of {class}"),
            Query::Value { object, property } => {
                write!(f, "value of {object}.{property}")
            }
        }
    }
}
